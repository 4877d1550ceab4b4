//! Appointments: the record, its status set, and validated inputs.
//!
//! Raw drafts arrive from inbound adapters with every field optional. The
//! constructors here decide what is required and produce the messages shown to
//! clients, so adapters never duplicate booking rules.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::present;
use super::calendar::parse_calendar_instant;
use super::{AppointmentId, DoctorId};

/// Lifecycle state of an appointment.
///
/// Transitions are permissive: any status may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Arrived,
    Waiting,
    Late,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Every status in display order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Arrived,
        Self::Waiting,
        Self::Late,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Arrived => "arrived",
            Self::Waiting => "waiting",
            Self::Late => "late",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentValidationError;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(AppointmentValidationError::InvalidStatus)
    }
}

fn status_names() -> String {
    AppointmentStatus::ALL
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validation failures for appointment inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentValidationError {
    #[error("Please fill in all required fields: name, email, phone, date, and time.")]
    IncompleteBooking,
    #[error("Patient name, phone, and time are required.")]
    IncompleteWalkIn,
    #[error("Invalid status. Must be one of: {}", status_names())]
    InvalidStatus,
    #[error("{field} must be an ISO 8601 date")]
    InvalidDate { field: &'static str },
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("{field} must be a valid UUID")]
    InvalidReference { field: &'static str },
}

/// Stored appointment.
///
/// ## Invariants
/// - `patient_name`, `phone`, and `appointment_time` are non-blank.
/// - `email`, when present, is lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub doctor: Option<DoctorId>,
    pub doctor_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
    pub is_walk_in: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw public booking input.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub patient_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub reason: Option<String>,
    pub doctor_name: Option<String>,
}

/// Raw walk-in input entered at the front desk.
#[derive(Debug, Clone, Default)]
pub struct WalkInDraft {
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub appointment_time: Option<String>,
    pub email: Option<String>,
    pub reason: Option<String>,
    pub doctor_name: Option<String>,
    pub date: Option<String>,
}

fn lowercase_email(email: Option<String>) -> Option<String> {
    present(email).map(|value| value.to_lowercase())
}

fn parse_date_field(raw: &str, field: &'static str) -> Result<DateTime<Utc>, AppointmentValidationError> {
    parse_calendar_instant(raw).ok_or(AppointmentValidationError::InvalidDate { field })
}

impl Appointment {
    /// Build a pending appointment from a public booking.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use clinic_backend::domain::{Appointment, AppointmentId, AppointmentStatus, BookingDraft};
    ///
    /// let draft = BookingDraft {
    ///     patient_name: Some("Jane Doe".into()),
    ///     email: Some("Jane@Example.com".into()),
    ///     phone: Some("555-0100".into()),
    ///     appointment_date: Some("2025-06-01".into()),
    ///     appointment_time: Some("10:00".into()),
    ///     ..BookingDraft::default()
    /// };
    /// let booked = Appointment::from_booking(draft, AppointmentId::random(), Utc::now()).unwrap();
    /// assert_eq!(booked.status, AppointmentStatus::Pending);
    /// assert_eq!(booked.email.as_deref(), Some("jane@example.com"));
    /// assert!(!booked.is_walk_in);
    /// ```
    pub fn from_booking(
        draft: BookingDraft,
        id: AppointmentId,
        now: DateTime<Utc>,
    ) -> Result<Self, AppointmentValidationError> {
        let BookingDraft {
            patient_name,
            email,
            phone,
            appointment_date,
            appointment_time,
            reason,
            doctor_name,
        } = draft;

        let (Some(patient_name), Some(email), Some(phone), Some(date), Some(time)) = (
            present(patient_name),
            lowercase_email(email),
            present(phone),
            present(appointment_date),
            present(appointment_time),
        ) else {
            return Err(AppointmentValidationError::IncompleteBooking);
        };
        let appointment_date = parse_date_field(&date, "appointmentDate")?;

        Ok(Self {
            id,
            patient_name,
            email: Some(email),
            phone,
            doctor: None,
            doctor_name: present(doctor_name),
            appointment_date,
            appointment_time: time,
            reason: present(reason),
            status: AppointmentStatus::Pending,
            is_walk_in: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Build a confirmed walk-in appointment, dated `now` unless the draft
    /// names a date.
    pub fn from_walk_in(
        draft: WalkInDraft,
        id: AppointmentId,
        now: DateTime<Utc>,
    ) -> Result<Self, AppointmentValidationError> {
        let WalkInDraft {
            patient_name,
            phone,
            appointment_time,
            email,
            reason,
            doctor_name,
            date,
        } = draft;

        let (Some(patient_name), Some(phone), Some(time)) = (
            present(patient_name),
            present(phone),
            present(appointment_time),
        ) else {
            return Err(AppointmentValidationError::IncompleteWalkIn);
        };
        let appointment_date = match present(date) {
            Some(raw) => parse_date_field(&raw, "date")?,
            None => now,
        };

        Ok(Self {
            id,
            patient_name,
            email: lowercase_email(email),
            phone,
            doctor: None,
            doctor_name: present(doctor_name),
            appointment_date,
            appointment_time: time,
            reason: present(reason),
            status: AppointmentStatus::Confirmed,
            is_walk_in: true,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Ordering used by appointment listings: date, then time text.
pub fn schedule_order(left: &Appointment, right: &Appointment) -> Ordering {
    left.appointment_date
        .cmp(&right.appointment_date)
        .then_with(|| left.appointment_time.cmp(&right.appointment_time))
}

/// Raw full-update input; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatchDraft {
    pub patient_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub doctor: Option<String>,
    pub doctor_name: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
    pub is_walk_in: Option<bool>,
    pub notes: Option<String>,
}

/// Validated full-update patch.
///
/// Outer `None` leaves a field unchanged. For optional columns,
/// `Some(None)` clears the stored value; clients request that by sending a
/// blank string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub patient_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<String>,
    pub doctor: Option<Option<DoctorId>>,
    pub doctor_name: Option<Option<String>>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub appointment_time: Option<String>,
    pub reason: Option<Option<String>>,
    pub status: Option<AppointmentStatus>,
    pub is_walk_in: Option<bool>,
    pub notes: Option<String>,
}

fn required_text(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, AppointmentValidationError> {
    match value {
        None => Ok(None),
        Some(raw) => present(Some(raw))
            .map(Some)
            .ok_or(AppointmentValidationError::BlankField { field }),
    }
}

fn clearable_text(value: Option<String>) -> Option<Option<String>> {
    value.map(|raw| present(Some(raw)))
}

impl AppointmentPatch {
    /// Validate a raw patch.
    pub fn try_from_draft(draft: AppointmentPatchDraft) -> Result<Self, AppointmentValidationError> {
        let AppointmentPatchDraft {
            patient_name,
            email,
            phone,
            doctor,
            doctor_name,
            appointment_date,
            appointment_time,
            reason,
            status,
            is_walk_in,
            notes,
        } = draft;

        let doctor = match clearable_text(doctor) {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(Some(raw.parse::<DoctorId>().map_err(|_| {
                AppointmentValidationError::InvalidReference { field: "doctor" }
            })?)),
        };
        let appointment_date = appointment_date
            .map(|raw| parse_date_field(&raw, "appointmentDate"))
            .transpose()?;
        let status = status.map(|raw| raw.parse::<AppointmentStatus>()).transpose()?;

        Ok(Self {
            patient_name: required_text(patient_name, "patientName")?,
            email: clearable_text(email).map(|value| value.map(|email| email.to_lowercase())),
            phone: required_text(phone, "phone")?,
            doctor,
            doctor_name: clearable_text(doctor_name),
            appointment_date,
            appointment_time: required_text(appointment_time, "appointmentTime")?,
            reason: clearable_text(reason),
            status,
            is_walk_in,
            notes,
        })
    }

    /// Apply the patch in place and stamp `updated_at`.
    pub fn apply_to(&self, appointment: &mut Appointment, now: DateTime<Utc>) {
        if let Some(value) = &self.patient_name {
            appointment.patient_name.clone_from(value);
        }
        if let Some(value) = &self.email {
            appointment.email.clone_from(value);
        }
        if let Some(value) = &self.phone {
            appointment.phone.clone_from(value);
        }
        if let Some(value) = self.doctor {
            appointment.doctor = value;
        }
        if let Some(value) = &self.doctor_name {
            appointment.doctor_name.clone_from(value);
        }
        if let Some(value) = self.appointment_date {
            appointment.appointment_date = value;
        }
        if let Some(value) = &self.appointment_time {
            appointment.appointment_time.clone_from(value);
        }
        if let Some(value) = &self.reason {
            appointment.reason.clone_from(value);
        }
        if let Some(value) = self.status {
            appointment.status = value;
        }
        if let Some(value) = self.is_walk_in {
            appointment.is_walk_in = value;
        }
        if let Some(value) = &self.notes {
            appointment.notes.clone_from(value);
        }
        appointment.updated_at = now;
    }
}

/// Raw listing filters taken from a query string.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilterDraft {
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
}

/// Status criterion of a listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status constraint (absent, or `All`).
    #[default]
    Any,
    Only(AppointmentStatus),
    /// A name outside the status set; no appointment carries it.
    Unmatched,
}

impl StatusFilter {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            return Self::Any;
        }
        raw.to_lowercase()
            .parse::<AppointmentStatus>()
            .map_or(Self::Unmatched, Self::Only)
    }

    pub fn admits(self, status: AppointmentStatus) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => wanted == status,
            Self::Unmatched => false,
        }
    }
}

/// Validated listing filter. Every present criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: StatusFilter,
    /// Inclusive lower bound on `appointment_date`.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `appointment_date`.
    pub end: Option<DateTime<Utc>>,
    /// Case-insensitive substring over name, phone, and email.
    pub search: Option<String>,
}

impl AppointmentFilter {
    /// Validate raw filters.
    ///
    /// The status is matched case-insensitively and `All` disables it. An
    /// unknown status name is not an error; it simply matches nothing.
    ///
    /// # Examples
    /// ```
    /// use clinic_backend::domain::{
    ///     AppointmentFilter, AppointmentFilterDraft, AppointmentStatus, StatusFilter,
    /// };
    ///
    /// let filter = AppointmentFilter::try_from_draft(AppointmentFilterDraft {
    ///     status: Some("Confirmed".into()),
    ///     ..AppointmentFilterDraft::default()
    /// })
    /// .unwrap();
    /// assert_eq!(filter.status, StatusFilter::Only(AppointmentStatus::Confirmed));
    /// ```
    pub fn try_from_draft(draft: AppointmentFilterDraft) -> Result<Self, AppointmentValidationError> {
        let status = present(draft.status)
            .map(|raw| StatusFilter::parse(&raw))
            .unwrap_or_default();
        let start = present(draft.start_date)
            .map(|raw| parse_date_field(&raw, "startDate"))
            .transpose()?;
        let end = present(draft.end_date)
            .map(|raw| parse_date_field(&raw, "endDate"))
            .transpose()?;

        Ok(Self {
            status,
            start,
            end,
            search: present(draft.search),
        })
    }

    /// Whether an appointment satisfies every criterion.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if !self.status.admits(appointment.status) {
            return false;
        }
        if self.start.is_some_and(|start| appointment.appointment_date < start) {
            return false;
        }
        if self.end.is_some_and(|end| appointment.appointment_date > end) {
            return false;
        }
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                [
                    Some(appointment.patient_name.as_str()),
                    Some(appointment.phone.as_str()),
                    appointment.email.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Dashboard counters for the current local day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStats {
    pub total_today: u64,
    /// Appointments confirmed for today.
    pub waiting: u64,
    pub late: u64,
    pub cancelled: u64,
    /// Every stored patient, regardless of date.
    pub total_patients: u64,
}

#[cfg(test)]
#[path = "appointment_tests.rs"]
mod tests;
