//! Port abstraction for blog post persistence.
use async_trait::async_trait;

use crate::domain::{BlogPost, BlogPostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by blog repository adapters.
    pub enum BlogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert(&self, post: &BlogPost) -> Result<(), BlogRepositoryError>;

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, BlogRepositoryError>;

    /// Posts newest first. `published_only` hides drafts.
    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, BlogRepositoryError>;

    /// Replace a stored post. Returns whether a record matched.
    async fn save(&self, post: &BlogPost) -> Result<bool, BlogRepositoryError>;

    async fn delete(&self, id: &BlogPostId) -> Result<bool, BlogRepositoryError>;
}
