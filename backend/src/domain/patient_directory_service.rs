//! Patient file management for front-desk staff.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{PatientDirectory, PatientRepository};
use super::{Error, Patient, PatientDraft, PatientId, PatientPatch};

const NOT_FOUND_MESSAGE: &str = "Patient not found.";

#[derive(Clone)]
pub struct PatientDirectoryService {
    patients: Arc<dyn PatientRepository>,
    clock: Arc<dyn Clock>,
}

impl PatientDirectoryService {
    pub fn new(patients: Arc<dyn PatientRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { patients, clock }
    }
}

#[async_trait]
impl PatientDirectory for PatientDirectoryService {
    async fn list(&self, search: Option<String>) -> Result<Vec<Patient>, Error> {
        let search = search.filter(|needle| !needle.trim().is_empty());
        Ok(self.patients.list(search).await?)
    }

    async fn get(&self, id: &PatientId) -> Result<Patient, Error> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn register(&self, draft: PatientDraft) -> Result<Patient, Error> {
        let patient = Patient::register(draft, PatientId::random(), self.clock.utc())?;
        self.patients.insert(&patient).await?;
        info!(patient_id = %patient.id, "patient registered");
        Ok(patient)
    }

    async fn update(&self, id: &PatientId, draft: PatientDraft) -> Result<Patient, Error> {
        let patch = PatientPatch::try_from_draft(draft)?;
        self.patients
            .update(id, &patch, self.clock.utc())
            .await?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn delete(&self, id: &PatientId) -> Result<(), Error> {
        if self.patients.delete(id).await? {
            info!(patient_id = %id, "patient deleted");
            Ok(())
        } else {
            Err(Error::not_found(NOT_FOUND_MESSAGE))
        }
    }
}
