//! Doctor profiles shown on the public website.

use chrono::{DateTime, Utc};

use super::auth::present;
use super::DoctorId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoctorValidationError {
    #[error("Doctor name is required.")]
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    /// URL or site-relative path of the profile photo.
    pub photo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw doctor input for creation and updates.
#[derive(Debug, Clone, Default)]
pub struct DoctorDraft {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub is_active: Option<bool>,
}

impl Doctor {
    /// Build a new profile; doctors are active unless stated otherwise.
    pub fn create(
        draft: DoctorDraft,
        id: DoctorId,
        now: DateTime<Utc>,
    ) -> Result<Self, DoctorValidationError> {
        let name = present(draft.name).ok_or(DoctorValidationError::MissingName)?;
        Ok(Self {
            id,
            name,
            specialty: present(draft.specialty),
            bio: present(draft.bio),
            photo: present(draft.photo),
            is_active: draft.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Validated doctor patch; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialty: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub photo: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl DoctorPatch {
    pub fn try_from_draft(draft: DoctorDraft) -> Result<Self, DoctorValidationError> {
        let name = match draft.name {
            None => None,
            Some(raw) => Some(present(Some(raw)).ok_or(DoctorValidationError::MissingName)?),
        };
        Ok(Self {
            name,
            specialty: draft.specialty.map(|raw| present(Some(raw))),
            bio: draft.bio.map(|raw| present(Some(raw))),
            photo: draft.photo.map(|raw| present(Some(raw))),
            is_active: draft.is_active,
        })
    }

    pub fn apply_to(&self, doctor: &mut Doctor, now: DateTime<Utc>) {
        if let Some(value) = &self.name {
            doctor.name.clone_from(value);
        }
        if let Some(value) = &self.specialty {
            doctor.specialty.clone_from(value);
        }
        if let Some(value) = &self.bio {
            doctor.bio.clone_from(value);
        }
        if let Some(value) = &self.photo {
            doctor.photo.clone_from(value);
        }
        if let Some(value) = self.is_active {
            doctor.is_active = value;
        }
        doctor.updated_at = now;
    }
}
