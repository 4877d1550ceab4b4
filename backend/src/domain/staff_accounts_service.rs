//! Staff signup, login, and account administration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use super::ports::{AuthSession, PasswordHasher, StaffAccounts, TokenCodec, UserRepository};
use super::store_errors::USERNAME_TAKEN_MESSAGE;
use super::{Error, LoginCredentials, Role, SignupRequest, StaffUser, UserId};

const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password.";
const DEACTIVATED_MESSAGE: &str = "Account is deactivated. Contact admin.";
const USER_NOT_FOUND_MESSAGE: &str = "User not found.";

/// Account service over the credential store, password hasher, and token
/// codec.
#[derive(Clone)]
pub struct StaffAccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl StaffAccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            codec,
            clock,
        }
    }

    fn issue(&self, user: &StaffUser) -> Result<String, Error> {
        self.codec
            .issue(&user.id, user.role)
            .map_err(|err| Error::internal(err.to_string()))
    }
}

/// Decide whether `creator` may open an account with role `target`.
///
/// Doctor accounts need an admin or receptionist behind the request.
/// Receptionist accounts may be opened anonymously, but a caller who did
/// present a token must hold one of those roles.
///
/// # Examples
/// ```
/// use clinic_backend::domain::{check_signup_creator, Role};
///
/// assert!(check_signup_creator(Role::Receptionist, None).is_ok());
/// assert!(check_signup_creator(Role::Doctor, None).is_err());
/// assert!(check_signup_creator(Role::Doctor, Some(Role::Admin)).is_ok());
/// ```
pub fn check_signup_creator(target: Role, creator: Option<Role>) -> Result<(), Error> {
    let privileged = |role: Role| matches!(role, Role::Admin | Role::Receptionist);
    let allowed = match (target, creator) {
        (Role::Receptionist, None) => true,
        (_, Some(role)) => privileged(role),
        (_, None) => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "Only admin or receptionist can create {target} accounts."
        )))
    }
}

#[async_trait]
impl StaffAccounts for StaffAccountService {
    async fn signup(
        &self,
        request: SignupRequest,
        creator: Option<Role>,
    ) -> Result<AuthSession, Error> {
        check_signup_creator(request.role(), creator)?;

        if self
            .users
            .find_by_username(request.username())
            .await?
            .is_some()
        {
            return Err(Error::conflict(USERNAME_TAKEN_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(request.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let now = self.clock.utc();
        let user = StaffUser {
            id: UserId::random(),
            name: request.name().to_owned(),
            username: request.username().to_owned(),
            email: request.email().map(str::to_owned),
            password_hash,
            role: request.role(),
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(&user).await?;
        info!(user_id = %user.id, role = %user.role, "staff account created");

        let token = self.issue(&user)?;
        Ok(AuthSession { token, user })
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let Some(mut user) = self.users.find_by_username(credentials.username()).await? else {
            self.hasher.verify_absent(credentials.password());
            debug!(username = credentials.username(), "login for unknown username");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };

        if !user.is_active {
            return Err(Error::forbidden(DEACTIVATED_MESSAGE));
        }

        if !self
            .hasher
            .verify(credentials.password(), &user.password_hash)
        {
            debug!(user_id = %user.id, "login with wrong password");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        }

        let now = self.clock.utc();
        self.users.record_login(&user.id, now).await?;
        user.last_login = Some(now);

        let token = self.issue(&user)?;
        Ok(AuthSession { token, user })
    }

    async fn list_users(&self) -> Result<Vec<StaffUser>, Error> {
        Ok(self.users.list().await?)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        if self.users.delete(id).await? {
            info!(user_id = %id, "staff account deleted");
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND_MESSAGE))
        }
    }
}

#[cfg(test)]
#[path = "staff_accounts_service_tests.rs"]
mod tests;
