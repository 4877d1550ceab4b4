//! One bundle of repository handles, backed by either PostgreSQL or the
//! in-memory store.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentRepository, BlogRepository, ContactRepository, DoctorRepository,
    PatientRepository, ReviewRepository, UserRepository,
};

use super::memory::InMemoryStore;
use super::persistence::{
    DbPool, DieselAppointmentRepository, DieselBlogRepository, DieselContactRepository,
    DieselDoctorRepository, DieselPatientRepository, DieselReviewRepository,
    DieselUserRepository,
};

#[derive(Clone)]
pub struct ClinicRepositories {
    pub users: Arc<dyn UserRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub patients: Arc<dyn PatientRepository>,
    pub doctors: Arc<dyn DoctorRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub blog: Arc<dyn BlogRepository>,
    pub contact: Arc<dyn ContactRepository>,
}

impl ClinicRepositories {
    /// Diesel repositories sharing one pool.
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            appointments: Arc::new(DieselAppointmentRepository::new(pool.clone())),
            patients: Arc::new(DieselPatientRepository::new(pool.clone())),
            doctors: Arc::new(DieselDoctorRepository::new(pool.clone())),
            reviews: Arc::new(DieselReviewRepository::new(pool.clone())),
            blog: Arc::new(DieselBlogRepository::new(pool.clone())),
            contact: Arc::new(DieselContactRepository::new(pool.clone())),
        }
    }

    /// Every port served by one fresh [`InMemoryStore`].
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            appointments: store.clone(),
            patients: store.clone(),
            doctors: store.clone(),
            reviews: store.clone(),
            blog: store.clone(),
            contact: store,
        }
    }
}
