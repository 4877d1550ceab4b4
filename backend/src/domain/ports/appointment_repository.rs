//! Port abstraction for appointment persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Appointment, AppointmentFilter, AppointmentId, AppointmentPatch, AppointmentStatus, DayWindow,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "appointment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "appointment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> Result<(), AppointmentRepositoryError>;

    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Appointments matching `filter`, ordered by date then time.
    async fn list(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// Appointments dated inside `window`, ordered by time.
    async fn list_within(
        &self,
        window: &DayWindow,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// Count appointments dated inside `window`, optionally restricted to one
    /// status.
    async fn count_within(
        &self,
        window: &DayWindow,
        status: Option<AppointmentStatus>,
    ) -> Result<u64, AppointmentRepositoryError>;

    /// Overwrite the status. Returns the updated record, or `None` when the
    /// id is unknown.
    async fn set_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Apply a patch. Returns the updated record, or `None` when the id is
    /// unknown.
    async fn update(
        &self,
        id: &AppointmentId,
        patch: &AppointmentPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &AppointmentId) -> Result<bool, AppointmentRepositoryError>;
}
