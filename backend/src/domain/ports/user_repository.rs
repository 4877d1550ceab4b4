//! Port abstraction for staff account persistence and its errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{StaffUser, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique username index rejected an insert.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account. Fails with `DuplicateUsername` on collision.
    async fn insert(&self, user: &StaffUser) -> Result<(), UserPersistenceError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<StaffUser>, UserPersistenceError>;

    /// Look up an account by its normalised username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StaffUser>, UserPersistenceError>;

    /// Stamp a successful login.
    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError>;

    /// Every account, newest first.
    async fn list(&self) -> Result<Vec<StaffUser>, UserPersistenceError>;

    /// Hard-delete an account. Returns whether a record was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
