//! Driving port for staff signup, login, and account administration.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Role, SignupRequest, StaffUser, UserId};

/// A freshly issued token together with the account it speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: StaffUser,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffAccounts: Send + Sync {
    /// Create an account. `creator` is the role of the caller, when the
    /// request carried a valid token.
    async fn signup(
        &self,
        request: SignupRequest,
        creator: Option<Role>,
    ) -> Result<AuthSession, Error>;

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;

    /// All accounts, newest first.
    async fn list_users(&self) -> Result<Vec<StaffUser>, Error>;

    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
