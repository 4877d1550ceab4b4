//! Authentication primitives: login credentials and signup requests.
//!
//! Handlers pass raw optional strings in; the constructors here decide what
//! counts as missing and produce the exact client-facing messages.

use zeroize::Zeroizing;

use super::user::normalize_username;
use super::Role;

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Raised when a login payload lacks a username or password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("Please provide username and password.")]
    MissingCredentials,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed, lowercased, and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use clinic_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some(" Doctor "), Some("doctor123")).unwrap();
/// assert_eq!(creds.username(), "doctor");
/// assert_eq!(creds.password(), "doctor123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, LoginValidationError> {
        let username = username.map(normalize_username).unwrap_or_default();
        let password = password.unwrap_or_default();
        if username.is_empty() || password.is_empty() {
            return Err(LoginValidationError::MissingCredentials);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raised when a signup payload is incomplete or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupValidationError {
    #[error("Name, username, password, and role are required.")]
    MissingFields,
    #[error("Role must be doctor or receptionist.")]
    UnsupportedRole,
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },
}

/// Raw signup input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct SignupDraft {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
}

/// Validated signup request.
///
/// Only doctor and receptionist accounts can be created through signup;
/// admin accounts are provisioned out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    name: String,
    username: String,
    password: Zeroizing<String>,
    role: Role,
    email: Option<String>,
}

impl SignupRequest {
    /// Validate a raw draft.
    ///
    /// # Examples
    /// ```
    /// use clinic_backend::domain::{Role, SignupDraft, SignupRequest};
    ///
    /// let request = SignupRequest::try_from_draft(SignupDraft {
    ///     name: Some("Dr. Grey".into()),
    ///     username: Some("MGrey".into()),
    ///     password: Some("hunter22".into()),
    ///     role: Some("doctor".into()),
    ///     email: None,
    /// })
    /// .unwrap();
    /// assert_eq!(request.username(), "mgrey");
    /// assert_eq!(request.role(), Role::Doctor);
    /// ```
    pub fn try_from_draft(draft: SignupDraft) -> Result<Self, SignupValidationError> {
        let SignupDraft {
            name,
            username,
            password,
            role,
            email,
        } = draft;

        let name = present(name);
        let username = present(username).map(|value| normalize_username(&value));
        let password = password.filter(|value| !value.is_empty());
        let role = present(role);
        let (Some(name), Some(username), Some(password), Some(role)) =
            (name, username, password, role)
        else {
            return Err(SignupValidationError::MissingFields);
        };

        let role = match role.parse::<Role>() {
            Ok(role @ (Role::Doctor | Role::Receptionist)) => role,
            _ => return Err(SignupValidationError::UnsupportedRole),
        };

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SignupValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(Self {
            name,
            username,
            password: Zeroizing::new(password),
            role,
            email: present(email).map(|value| value.to_lowercase()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Trim a value and treat blank input as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
