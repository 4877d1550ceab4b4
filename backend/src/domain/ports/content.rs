//! Driving ports for the public website content: doctors, reviews, blog
//! posts, and contact messages.

use async_trait::async_trait;

use crate::domain::{
    BlogPost, BlogPostDraft, BlogPostId, ContactDraft, ContactMessage, ContactMessageId, Doctor,
    DoctorDraft, DoctorId, Error, Review, ReviewDraft, ReviewId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Doctor>, Error>;
    async fn get(&self, id: &DoctorId) -> Result<Doctor, Error>;
    async fn create(&self, draft: DoctorDraft) -> Result<Doctor, Error>;
    async fn update(&self, id: &DoctorId, draft: DoctorDraft) -> Result<Doctor, Error>;
    async fn delete(&self, id: &DoctorId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewBoard: Send + Sync {
    async fn submit(&self, draft: ReviewDraft) -> Result<Review, Error>;
    /// Reviews newest first; `approved_only` is the public view.
    async fn list(&self, approved_only: bool) -> Result<Vec<Review>, Error>;
    async fn approve(&self, id: &ReviewId) -> Result<Review, Error>;
    /// Removing an unknown review succeeds.
    async fn delete(&self, id: &ReviewId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogCatalogue: Send + Sync {
    /// Posts newest first; `published_only` is the public view.
    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, Error>;
    async fn get(&self, id: &BlogPostId) -> Result<BlogPost, Error>;
    async fn create(&self, draft: BlogPostDraft) -> Result<BlogPost, Error>;
    async fn update(&self, id: &BlogPostId, draft: BlogPostDraft) -> Result<BlogPost, Error>;
    /// Removing an unknown post succeeds.
    async fn delete(&self, id: &BlogPostId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactInbox: Send + Sync {
    async fn receive(&self, draft: ContactDraft) -> Result<ContactMessage, Error>;
    async fn list(&self) -> Result<Vec<ContactMessage>, Error>;
    async fn mark_read(&self, id: &ContactMessageId) -> Result<ContactMessage, Error>;
    /// Removing an unknown message succeeds.
    async fn delete(&self, id: &ContactMessageId) -> Result<(), Error>;
}
