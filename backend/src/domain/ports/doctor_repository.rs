//! Port abstraction for doctor profile persistence.
use async_trait::async_trait;

use crate::domain::{Doctor, DoctorId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by doctor repository adapters.
    pub enum DoctorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "doctor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "doctor repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn insert(&self, doctor: &Doctor) -> Result<(), DoctorRepositoryError>;

    async fn find_by_id(&self, id: &DoctorId) -> Result<Option<Doctor>, DoctorRepositoryError>;

    /// Doctors ordered by name. `active_only` hides deactivated profiles.
    async fn list(&self, active_only: bool) -> Result<Vec<Doctor>, DoctorRepositoryError>;

    /// Replace a stored profile. Returns whether a record matched.
    async fn save(&self, doctor: &Doctor) -> Result<bool, DoctorRepositoryError>;

    async fn delete(&self, id: &DoctorId) -> Result<bool, DoctorRepositoryError>;
}
