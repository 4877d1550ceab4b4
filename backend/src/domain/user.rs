//! Staff accounts and their roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Role carried by a staff account and encoded in issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Receptionist,
}

impl Role {
    /// Lowercase wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Receptionist => "receptionist",
        }
    }

    /// Role name with the first letter capitalised, as used in greetings.
    ///
    /// # Examples
    /// ```
    /// use clinic_backend::domain::Role;
    ///
    /// assert_eq!(Role::Receptionist.title(), "Receptionist");
    /// ```
    pub fn title(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Doctor => "Doctor",
            Self::Receptionist => "Receptionist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role string names none of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {value}")]
pub struct RoleParseError {
    pub value: String,
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "receptionist" => Ok(Self::Receptionist),
            other => Err(RoleParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Stored staff account.
///
/// ## Invariants
/// - `username` is trimmed and lowercased before it reaches the store.
/// - `password_hash` is a PHC string and never leaves the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffUser {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalise a username for storage and lookup.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}
