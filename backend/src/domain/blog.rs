//! Blog posts published on the clinic website.

use chrono::{DateTime, Utc};

use super::auth::present;
use super::BlogPostId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogValidationError {
    #[error("Title and content are required.")]
    MissingFields,
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BlogPostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

impl BlogPost {
    /// Build a post; drafts stay unpublished unless flagged.
    pub fn create(
        draft: BlogPostDraft,
        id: BlogPostId,
        now: DateTime<Utc>,
    ) -> Result<Self, BlogValidationError> {
        let (Some(title), Some(content)) = (present(draft.title), present(draft.content)) else {
            return Err(BlogValidationError::MissingFields);
        };
        Ok(Self {
            id,
            title,
            content,
            image: present(draft.image),
            is_published: draft.is_published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<Option<String>>,
    pub is_published: Option<bool>,
}

impl BlogPostPatch {
    pub fn try_from_draft(draft: BlogPostDraft) -> Result<Self, BlogValidationError> {
        let non_blank = |value: Option<String>, field: &'static str| match value {
            None => Ok(None),
            Some(raw) => present(Some(raw))
                .map(Some)
                .ok_or(BlogValidationError::BlankField { field }),
        };
        Ok(Self {
            title: non_blank(draft.title, "title")?,
            content: non_blank(draft.content, "content")?,
            image: draft.image.map(|raw| present(Some(raw))),
            is_published: draft.is_published,
        })
    }

    pub fn apply_to(&self, post: &mut BlogPost, now: DateTime<Utc>) {
        if let Some(value) = &self.title {
            post.title.clone_from(value);
        }
        if let Some(value) = &self.content {
            post.content.clone_from(value);
        }
        if let Some(value) = &self.image {
            post.image.clone_from(value);
        }
        if let Some(value) = self.is_published {
            post.is_published = value;
        }
        post.updated_at = now;
    }
}
