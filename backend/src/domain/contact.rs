//! Messages submitted through the website contact form.

use chrono::{DateTime, Utc};

use super::auth::present;
use super::ContactMessageId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("Please fill in your name, email, and message.")]
    MissingFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw form input. Older site builds send `name` instead of `fullName`.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl ContactMessage {
    pub fn receive(
        draft: ContactDraft,
        id: ContactMessageId,
        now: DateTime<Utc>,
    ) -> Result<Self, ContactValidationError> {
        let sender = present(draft.full_name).or_else(|| present(draft.name));
        let (Some(full_name), Some(email), Some(message)) =
            (sender, present(draft.email), present(draft.message))
        else {
            return Err(ContactValidationError::MissingFields);
        };
        Ok(Self {
            id,
            full_name,
            email: email.to_lowercase(),
            phone: present(draft.phone),
            message,
            is_read: false,
            created_at: now,
            updated_at: now,
        })
    }
}
