//! Driving port for appointment reads.

use async_trait::async_trait;

use crate::domain::{Appointment, AppointmentFilterDraft, AppointmentId, AppointmentStats, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentQuery: Send + Sync {
    /// Filtered listing ordered by date, then time.
    async fn list(&self, filter: AppointmentFilterDraft) -> Result<Vec<Appointment>, Error>;

    /// Appointments for the current local day ordered by time.
    async fn today(&self) -> Result<Vec<Appointment>, Error>;

    async fn stats(&self) -> Result<AppointmentStats, Error>;

    async fn get(&self, id: &AppointmentId) -> Result<Appointment, Error>;
}
