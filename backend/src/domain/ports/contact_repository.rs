//! Port abstraction for contact form messages.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ContactMessage, ContactMessageId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError>;

    /// Messages newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, ContactRepositoryError>;

    /// Returns `None` for an unknown id.
    async fn mark_read(
        &self,
        id: &ContactMessageId,
        at: DateTime<Utc>,
    ) -> Result<Option<ContactMessage>, ContactRepositoryError>;

    async fn delete(&self, id: &ContactMessageId) -> Result<bool, ContactRepositoryError>;
}
