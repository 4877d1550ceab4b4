//! Patient records and the visit tally kept alongside them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::auth::present;
use super::calendar::parse_calendar_date;
use super::PatientId;

/// Loyalty status. Moves from `New` to `Regular` once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PatientStatus {
    #[default]
    New,
    Regular,
}

impl PatientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Regular => "Regular",
        }
    }
}

impl FromStr for PatientStatus {
    type Err = PatientValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Regular" => Ok(Self::Regular),
            _ => Err(PatientValidationError::UnknownStatus),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = PatientValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(PatientValidationError::UnknownGender),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientValidationError {
    #[error("Patient name is required.")]
    MissingName,
    #[error("gender must be one of: male, female, other")]
    UnknownGender,
    #[error("status must be New or Regular")]
    UnknownStatus,
    #[error("dateOfBirth must be an ISO 8601 date")]
    InvalidDateOfBirth,
}

/// Stored patient record.
///
/// ## Invariants
/// - `name` is non-blank; `email`, when present, is lowercased.
/// - `total_visits` never decreases and `status` never reverts to `New`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub gender: Option<Gender>,
    pub blood_group: Option<String>,
    pub notes: String,
    pub status: PatientStatus,
    pub total_visits: u32,
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Visit aggregates maintained by the visit ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTally {
    pub total_visits: u32,
    pub last_visit: Option<DateTime<Utc>>,
    pub status: PatientStatus,
}

impl Patient {
    /// First record for someone who walked in without a patient file.
    pub fn first_walk_in(
        id: PatientId,
        name: String,
        email: Option<String>,
        phone: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email: email.map(|value| value.to_lowercase()),
            phone: Some(phone),
            date_of_birth: None,
            address: None,
            gender: None,
            blood_group: None,
            notes: String::new(),
            status: PatientStatus::New,
            total_visits: 1,
            last_visit: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Count another walk-in visit.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use clinic_backend::domain::{Patient, PatientId, PatientStatus};
    ///
    /// let now = Utc::now();
    /// let mut patient =
    ///     Patient::first_walk_in(PatientId::random(), "Jane".into(), None, "555".into(), now);
    /// patient.record_walk_in(now);
    /// assert_eq!(patient.total_visits, 2);
    /// assert_eq!(patient.status, PatientStatus::Regular);
    /// ```
    pub fn record_walk_in(&mut self, now: DateTime<Utc>) {
        self.total_visits = self.total_visits.saturating_add(1);
        self.last_visit = Some(now);
        if self.status == PatientStatus::New {
            self.status = PatientStatus::Regular;
        }
        self.updated_at = now;
    }

    /// Current visit aggregates.
    pub fn tally(&self) -> VisitTally {
        VisitTally {
            total_visits: self.total_visits,
            last_visit: self.last_visit,
            status: self.status,
        }
    }
}

/// Raw patient input used for creation and for updates.
#[derive(Debug, Clone, Default)]
pub struct PatientDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub notes: Option<String>,
}

fn parse_gender(raw: Option<String>) -> Result<Option<Gender>, PatientValidationError> {
    present(raw).map(|value| value.parse()).transpose()
}

fn parse_birth_date(raw: Option<String>) -> Result<Option<NaiveDate>, PatientValidationError> {
    present(raw)
        .map(|value| parse_calendar_date(&value).ok_or(PatientValidationError::InvalidDateOfBirth))
        .transpose()
}

impl Patient {
    /// Build a new record from staff input. Visit aggregates start empty.
    pub fn register(
        draft: PatientDraft,
        id: PatientId,
        now: DateTime<Utc>,
    ) -> Result<Self, PatientValidationError> {
        let name = present(draft.name).ok_or(PatientValidationError::MissingName)?;
        Ok(Self {
            id,
            name,
            email: present(draft.email).map(|value| value.to_lowercase()),
            phone: present(draft.phone),
            date_of_birth: parse_birth_date(draft.date_of_birth)?,
            address: present(draft.address),
            gender: parse_gender(draft.gender)?,
            blood_group: present(draft.blood_group),
            notes: draft.notes.unwrap_or_default(),
            status: PatientStatus::New,
            total_visits: 0,
            last_visit: None,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Validated demographic patch. Visit aggregates are not client-writable.
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub address: Option<Option<String>>,
    pub gender: Option<Option<Gender>>,
    pub blood_group: Option<Option<String>>,
    pub notes: Option<String>,
}

impl PatientPatch {
    pub fn try_from_draft(draft: PatientDraft) -> Result<Self, PatientValidationError> {
        let name = match draft.name {
            None => None,
            Some(raw) => Some(present(Some(raw)).ok_or(PatientValidationError::MissingName)?),
        };
        let date_of_birth = match draft.date_of_birth {
            None => None,
            Some(raw) => Some(parse_birth_date(Some(raw))?),
        };
        let gender = match draft.gender {
            None => None,
            Some(raw) => Some(parse_gender(Some(raw))?),
        };

        Ok(Self {
            name,
            email: draft
                .email
                .map(|raw| present(Some(raw)).map(|value| value.to_lowercase())),
            phone: draft.phone.map(|raw| present(Some(raw))),
            date_of_birth,
            address: draft.address.map(|raw| present(Some(raw))),
            gender,
            blood_group: draft.blood_group.map(|raw| present(Some(raw))),
            notes: draft.notes,
        })
    }

    pub fn apply_to(&self, patient: &mut Patient, now: DateTime<Utc>) {
        if let Some(value) = &self.name {
            patient.name.clone_from(value);
        }
        if let Some(value) = &self.email {
            patient.email.clone_from(value);
        }
        if let Some(value) = &self.phone {
            patient.phone.clone_from(value);
        }
        if let Some(value) = self.date_of_birth {
            patient.date_of_birth = value;
        }
        if let Some(value) = &self.address {
            patient.address.clone_from(value);
        }
        if let Some(value) = self.gender {
            patient.gender = value;
        }
        if let Some(value) = &self.blood_group {
            patient.blood_group.clone_from(value);
        }
        if let Some(value) = &self.notes {
            patient.notes.clone_from(value);
        }
        patient.updated_at = now;
    }
}

/// Case-insensitive substring match over name, phone, and email.
pub fn patient_matches_search(patient: &Patient, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [
        Some(patient.name.as_str()),
        patient.phone.as_deref(),
        patient.email.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|haystack| haystack.to_lowercase().contains(&needle))
}
