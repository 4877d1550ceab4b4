//! Driving port that turns a bearer token into a caller identity.
//!
//! Inbound adapters call this once per gated request, then apply
//! [`crate::domain::authorize`] for role allow-lists.

use async_trait::async_trait;

use crate::domain::{Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// Resolve a raw bearer token (without the `Bearer ` prefix).
    ///
    /// Fails with `unauthorized` for invalid, expired, or orphaned tokens and
    /// with `internal`/`service_unavailable` when the account store fails.
    async fn resolve(&self, token: &str) -> Result<Identity, Error>;
}
