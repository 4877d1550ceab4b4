//! Patient visit ledger: visit counts, last visit, and New/Regular status
//! kept up to date as appointments happen.
//!
//! Patients are matched on phone number, oldest record first. This is a
//! lookup convention rather than a foreign key, so two patients sharing a
//! phone number will have visits credited to whichever registered first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::ports::{PatientRepository, PatientRepositoryError};
use super::{Patient, PatientId};

#[derive(Clone)]
pub struct VisitLedger {
    patients: Arc<dyn PatientRepository>,
}

impl VisitLedger {
    pub fn new(patients: Arc<dyn PatientRepository>) -> Self {
        Self { patients }
    }

    /// Credit a walk-in visit, opening a patient file when the phone number
    /// is unknown. Returns the patient as stored afterwards.
    pub async fn record_walk_in_visit(
        &self,
        name: &str,
        email: Option<&str>,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<Patient, PatientRepositoryError> {
        match self.patients.find_first_by_phone(phone).await? {
            Some(mut patient) => {
                patient.record_walk_in(now);
                self.patients
                    .save_tally(&patient.id, &patient.tally(), now)
                    .await?;
                debug!(patient_id = %patient.id, visits = patient.total_visits, "walk-in visit counted");
                Ok(patient)
            }
            None => {
                let patient = Patient::first_walk_in(
                    PatientId::random(),
                    name.to_owned(),
                    email.map(str::to_owned),
                    phone.to_owned(),
                    now,
                );
                self.patients.insert(&patient).await?;
                info!(patient_id = %patient.id, "patient file opened for walk-in");
                Ok(patient)
            }
        }
    }

    /// Credit a completed appointment. Unknown phone numbers are ignored.
    pub async fn record_completion_visit(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, PatientRepositoryError> {
        let matched = self.patients.record_completion(phone, now).await?;
        if !matched {
            debug!("completed appointment has no matching patient");
        }
        Ok(matched)
    }
}
