//! Port abstraction for patient persistence, including visit bookkeeping.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Patient, PatientId, PatientPatch, VisitTally};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "patient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "patient repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn insert(&self, patient: &Patient) -> Result<(), PatientRepositoryError>;

    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Oldest patient registered under `phone`, if any.
    async fn find_first_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Patients newest first, optionally narrowed by a case-insensitive
    /// substring over name, phone, and email.
    async fn list(&self, search: Option<String>)
    -> Result<Vec<Patient>, PatientRepositoryError>;

    async fn update(
        &self,
        id: &PatientId,
        patch: &PatientPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Persist visit aggregates computed by the caller.
    async fn save_tally(
        &self,
        id: &PatientId,
        tally: &VisitTally,
        at: DateTime<Utc>,
    ) -> Result<(), PatientRepositoryError>;

    /// In one atomic statement against the oldest patient with `phone`:
    /// increment `total_visits`, set `last_visit`, and mark them `Regular`.
    /// Returns whether a patient matched.
    async fn record_completion(
        &self,
        phone: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, PatientRepositoryError>;

    async fn delete(&self, id: &PatientId) -> Result<bool, PatientRepositoryError>;

    async fn count(&self) -> Result<u64, PatientRepositoryError>;
}
