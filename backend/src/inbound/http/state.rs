//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessGate, AppointmentCommand, AppointmentQuery, BlogCatalogue, ContactInbox,
    DoctorDirectory, PatientDirectory, ReviewBoard, StaffAccounts,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub access: Arc<dyn AccessGate>,
    pub staff: Arc<dyn StaffAccounts>,
    pub appointments: Arc<dyn AppointmentCommand>,
    pub appointments_query: Arc<dyn AppointmentQuery>,
    pub patients: Arc<dyn PatientDirectory>,
    pub doctors: Arc<dyn DoctorDirectory>,
    pub reviews: Arc<dyn ReviewBoard>,
    pub blog: Arc<dyn BlogCatalogue>,
    pub contact: Arc<dyn ContactInbox>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub access: Arc<dyn AccessGate>,
    pub staff: Arc<dyn StaffAccounts>,
    pub appointments: Arc<dyn AppointmentCommand>,
    pub appointments_query: Arc<dyn AppointmentQuery>,
    pub patients: Arc<dyn PatientDirectory>,
    pub doctors: Arc<dyn DoctorDirectory>,
    pub reviews: Arc<dyn ReviewBoard>,
    pub blog: Arc<dyn BlogCatalogue>,
    pub contact: Arc<dyn ContactInbox>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            access,
            staff,
            appointments,
            appointments_query,
            patients,
            doctors,
            reviews,
            blog,
            contact,
        } = ports;
        Self {
            access,
            staff,
            appointments,
            appointments_query,
            patients,
            doctors,
            reviews,
            blog,
            contact,
        }
    }
}
