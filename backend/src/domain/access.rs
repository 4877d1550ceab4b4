//! Resolved caller identity and role-based authorisation.

use super::{Error, Role, StaffUser, UserId};

/// Message returned when no bearer token accompanies a gated request.
pub const MISSING_TOKEN_MESSAGE: &str = "Not authorized. No token provided.";
/// Message returned when a token fails verification.
pub const INVALID_TOKEN_MESSAGE: &str = "Token is invalid or expired.";
/// Message returned when a token names an unknown or deactivated account.
pub const INACTIVE_USER_MESSAGE: &str = "User not found or inactive.";

/// Caller identity established by the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Token carried a subject id that resolved to an active stored account.
    Staff(StaffUser),
    /// Token carried only a bare username; treated as an administrator
    /// without consulting the credential store.
    Legacy { username: String },
}

impl Identity {
    /// Role used for authorisation decisions.
    pub fn role(&self) -> Role {
        match self {
            Self::Staff(user) => user.role,
            Self::Legacy { .. } => Role::Admin,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Staff(user) => &user.username,
            Self::Legacy { username } => username,
        }
    }

    /// Stored account id, absent for legacy identities.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Staff(user) => Some(&user.id),
            Self::Legacy { .. } => None,
        }
    }
}

/// Check that `role` appears in `allowed`.
///
/// # Examples
/// ```
/// use clinic_backend::domain::{authorize, Role};
///
/// assert!(authorize(Role::Admin, &[Role::Admin, Role::Receptionist]).is_ok());
/// let denied = authorize(Role::Doctor, &[Role::Admin]).unwrap_err();
/// assert_eq!(denied.message(), "Access denied. Role 'doctor' is not permitted.");
/// ```
pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), Error> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "Access denied. Role '{role}' is not permitted."
        )))
    }
}
