//! Driving port for patient record management.

use async_trait::async_trait;

use crate::domain::{Error, Patient, PatientDraft, PatientId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn list(&self, search: Option<String>) -> Result<Vec<Patient>, Error>;

    async fn get(&self, id: &PatientId) -> Result<Patient, Error>;

    async fn register(&self, draft: PatientDraft) -> Result<Patient, Error>;

    /// Patch demographic fields. Visit ledger fields are not writable here.
    async fn update(&self, id: &PatientId, draft: PatientDraft) -> Result<Patient, Error>;

    async fn delete(&self, id: &PatientId) -> Result<(), Error>;
}
