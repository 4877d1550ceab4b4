//! Port abstraction for review persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Review, ReviewId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    /// Reviews newest first. `approved_only` hides unmoderated entries.
    async fn list(&self, approved_only: bool) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Mark a review approved. Returns `None` for an unknown id.
    async fn approve(
        &self,
        id: &ReviewId,
        at: DateTime<Utc>,
    ) -> Result<Option<Review>, ReviewRepositoryError>;

    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewRepositoryError>;
}
