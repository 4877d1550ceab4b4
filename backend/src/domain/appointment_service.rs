//! Appointment lifecycle: booking, walk-ins, status changes, and the daily
//! dashboard.
//!
//! Any of the seven statuses may be set from any other; the only check is
//! membership in the known set. Walk-ins and completions write the
//! appointment first and the patient ledger second, without a shared
//! transaction.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use super::ports::{
    AppointmentCommand, AppointmentQuery, AppointmentRepository, PatientRepository,
};
use super::{
    Appointment, AppointmentFilter, AppointmentFilterDraft, AppointmentId, AppointmentPatch,
    AppointmentPatchDraft, AppointmentStats, AppointmentStatus, BookingDraft, DayWindow, Error,
    VisitLedger, WalkInDraft,
};

const NOT_FOUND_MESSAGE: &str = "Appointment not found.";

#[derive(Clone)]
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    ledger: VisitLedger,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            ledger: VisitLedger::new(Arc::clone(&patients)),
            patients,
            clock,
        }
    }

    fn today_window(&self) -> Result<DayWindow, Error> {
        DayWindow::containing(&self.clock.local())
            .ok_or_else(|| Error::internal("could not determine the local day"))
    }

    fn not_found() -> Error {
        Error::not_found(NOT_FOUND_MESSAGE)
    }
}

#[async_trait]
impl AppointmentCommand for AppointmentService {
    async fn book(&self, draft: BookingDraft) -> Result<Appointment, Error> {
        let appointment =
            Appointment::from_booking(draft, AppointmentId::random(), self.clock.utc())?;
        self.appointments.insert(&appointment).await?;
        info!(appointment_id = %appointment.id, "appointment booked");
        Ok(appointment)
    }

    async fn register_walk_in(&self, draft: WalkInDraft) -> Result<Appointment, Error> {
        let now = self.clock.utc();
        let appointment = Appointment::from_walk_in(draft, AppointmentId::random(), now)?;
        self.appointments.insert(&appointment).await?;
        info!(appointment_id = %appointment.id, "walk-in registered");

        self.ledger
            .record_walk_in_visit(
                &appointment.patient_name,
                appointment.email.as_deref(),
                &appointment.phone,
                now,
            )
            .await
            .inspect_err(|err| {
                warn!(appointment_id = %appointment.id, error = %err, "walk-in saved but visit ledger update failed");
            })?;
        Ok(appointment)
    }

    async fn update_status(
        &self,
        id: &AppointmentId,
        status: &str,
    ) -> Result<Appointment, Error> {
        let status: AppointmentStatus = status.parse()?;
        let now = self.clock.utc();
        let appointment = self
            .appointments
            .set_status(id, status, now)
            .await?
            .ok_or_else(Self::not_found)?;
        info!(appointment_id = %id, %status, "appointment status changed");

        if status == AppointmentStatus::Completed {
            self.ledger
                .record_completion_visit(&appointment.phone, now)
                .await
                .inspect_err(|err| {
                    warn!(appointment_id = %id, error = %err, "completion saved but visit ledger update failed");
                })?;
        }
        Ok(appointment)
    }

    async fn update(
        &self,
        id: &AppointmentId,
        draft: AppointmentPatchDraft,
    ) -> Result<Appointment, Error> {
        let patch = AppointmentPatch::try_from_draft(draft)?;
        self.appointments
            .update(id, &patch, self.clock.utc())
            .await?
            .ok_or_else(Self::not_found)
    }

    async fn delete(&self, id: &AppointmentId) -> Result<(), Error> {
        if self.appointments.delete(id).await? {
            info!(appointment_id = %id, "appointment deleted");
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }
}

#[async_trait]
impl AppointmentQuery for AppointmentService {
    async fn list(&self, filter: AppointmentFilterDraft) -> Result<Vec<Appointment>, Error> {
        let filter = AppointmentFilter::try_from_draft(filter)?;
        Ok(self.appointments.list(&filter).await?)
    }

    async fn today(&self) -> Result<Vec<Appointment>, Error> {
        let window = self.today_window()?;
        Ok(self.appointments.list_within(&window).await?)
    }

    async fn stats(&self) -> Result<AppointmentStats, Error> {
        let window = self.today_window()?;
        let count = |status| self.appointments.count_within(&window, status);
        Ok(AppointmentStats {
            total_today: count(None).await?,
            waiting: count(Some(AppointmentStatus::Confirmed)).await?,
            late: count(Some(AppointmentStatus::Late)).await?,
            cancelled: count(Some(AppointmentStatus::Cancelled)).await?,
            total_patients: self.patients.count().await?,
        })
    }

    async fn get(&self, id: &AppointmentId) -> Result<Appointment, Error> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)
    }
}

#[cfg(test)]
#[path = "appointment_service_tests.rs"]
mod tests;
