//! Driving port for appointment writes.

use async_trait::async_trait;

use crate::domain::{
    Appointment, AppointmentId, AppointmentPatchDraft, BookingDraft, Error, WalkInDraft,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentCommand: Send + Sync {
    /// Public booking. The appointment starts `pending`.
    async fn book(&self, draft: BookingDraft) -> Result<Appointment, Error>;

    /// Front-desk walk-in. The appointment starts `confirmed` and the
    /// patient's visit ledger is updated.
    async fn register_walk_in(&self, draft: WalkInDraft) -> Result<Appointment, Error>;

    /// Set any of the known statuses. Completing an appointment counts a
    /// visit for the patient sharing its phone number.
    async fn update_status(&self, id: &AppointmentId, status: &str)
    -> Result<Appointment, Error>;

    async fn update(
        &self,
        id: &AppointmentId,
        draft: AppointmentPatchDraft,
    ) -> Result<Appointment, Error>;

    async fn delete(&self, id: &AppointmentId) -> Result<(), Error>;
}
