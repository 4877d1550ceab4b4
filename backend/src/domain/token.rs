//! Session token claims as understood by the domain.

use chrono::Duration;

use super::{Role, UserId};

/// Lifetime of a freshly issued token, in hours.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Lifetime of a freshly issued token.
pub fn token_lifetime() -> Duration {
    Duration::hours(TOKEN_LIFETIME_HOURS)
}

/// Subject recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSubject {
    /// Current-scheme token naming a stored account.
    Account { user_id: UserId, role: Role },
    /// Older token carrying only a username; implies the admin role.
    Legacy { username: String },
}

impl TokenSubject {
    /// Role asserted by the token.
    pub fn role(&self) -> Role {
        match self {
            Self::Account { role, .. } => *role,
            Self::Legacy { .. } => Role::Admin,
        }
    }
}
