//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, token codec, password hasher) are implemented
//! by outbound adapters. Driving ports (access gate, staff accounts,
//! appointment command/query, directories) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod access_gate;
mod appointment_command;
mod appointment_query;
mod appointment_repository;
mod blog_repository;
mod contact_repository;
mod content;
mod doctor_repository;
mod password_hasher;
mod patient_directory;
mod patient_repository;
mod review_repository;
mod staff_accounts;
mod token_codec;
mod user_repository;

pub use access_gate::AccessGate;
#[cfg(test)]
pub use access_gate::MockAccessGate;
pub use appointment_command::AppointmentCommand;
#[cfg(test)]
pub use appointment_command::MockAppointmentCommand;
pub use appointment_query::AppointmentQuery;
#[cfg(test)]
pub use appointment_query::MockAppointmentQuery;
#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{AppointmentRepository, AppointmentRepositoryError};
#[cfg(test)]
pub use blog_repository::MockBlogRepository;
pub use blog_repository::{BlogRepository, BlogRepositoryError};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
pub use content::{BlogCatalogue, ContactInbox, DoctorDirectory, ReviewBoard};
#[cfg(test)]
pub use content::{MockBlogCatalogue, MockContactInbox, MockDoctorDirectory, MockReviewBoard};
#[cfg(test)]
pub use doctor_repository::MockDoctorRepository;
pub use doctor_repository::{DoctorRepository, DoctorRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use patient_directory::MockPatientDirectory;
pub use patient_directory::PatientDirectory;
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{PatientRepository, PatientRepositoryError};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use staff_accounts::MockStaffAccounts;
pub use staff_accounts::{AuthSession, StaffAccounts};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
