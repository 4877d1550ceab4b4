//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and clinic domain types and
//! hold no business rules. Row structs (`models.rs`) and the table
//! definitions (`schema.rs`) stay private to this module. Connections come
//! from a shared `bb8` pool driven by `diesel-async`.
//!
//! ```ignore
//! use clinic_backend::outbound::persistence::{DbPool, DieselPatientRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/clinic")).await?;
//! let patients = DieselPatientRepository::new(pool);
//! ```

mod diesel_appointment_repository;
mod diesel_basic_error_mapping;
mod diesel_helpers;
mod diesel_content_repositories;
mod diesel_patient_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_content_repositories::{
    DieselBlogRepository, DieselContactRepository, DieselDoctorRepository, DieselReviewRepository,
};
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
