//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Each `*Row` converts into
//! its domain entity with `into_domain`, which fails with a plain message when
//! a stored enum column holds a value the domain does not recognise.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Appointment, AppointmentId, AppointmentPatch, BlogPost, BlogPostId, ContactMessage,
    ContactMessageId, Doctor, DoctorId, Patient, PatientId, PatientPatch, Review, ReviewId,
    StaffUser, UserId, VisitTally,
};

use super::schema::{
    appointments, blog_posts, contact_messages, doctors, patients, reviews, users,
};

fn decode<T: std::str::FromStr>(column: &str, raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("unexpected {column} value in storage: {raw}"))
}

fn visits_from_db(raw: i32) -> Result<u32, String> {
    u32::try_from(raw).map_err(|_| format!("negative total_visits in storage: {raw}"))
}

/// Clamp a visit count into the column type.
pub(crate) fn visits_to_db(visits: u32) -> i32 {
    i32::try_from(visits).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_domain(self) -> Result<StaffUser, String> {
        Ok(StaffUser {
            id: UserId::from_uuid(self.id),
            role: decode("role", &self.role)?,
            name: self.name,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
    pub role: &'static str,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a StaffUser> for NewUserRow<'a> {
    fn from(user: &'a StaffUser) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: &user.name,
            username: &user.username,
            email: user.email.as_deref(),
            password_hash: &user.password_hash,
            role: user.role.as_str(),
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppointmentRow {
    pub id: Uuid,
    pub patient_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub doctor_id: Option<Uuid>,
    pub doctor_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
    pub reason: Option<String>,
    pub status: String,
    pub is_walk_in: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AppointmentRow {
    pub fn into_domain(self) -> Result<Appointment, String> {
        Ok(Appointment {
            id: AppointmentId::from_uuid(self.id),
            status: decode("status", &self.status)?,
            patient_name: self.patient_name,
            email: self.email,
            phone: self.phone,
            doctor: self.doctor_id.map(DoctorId::from_uuid),
            doctor_name: self.doctor_name,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            reason: self.reason,
            is_walk_in: self.is_walk_in,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow<'a> {
    pub id: Uuid,
    pub patient_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: &'a str,
    pub doctor_id: Option<Uuid>,
    pub doctor_name: Option<&'a str>,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: &'a str,
    pub reason: Option<&'a str>,
    pub status: &'static str,
    pub is_walk_in: bool,
    pub notes: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Appointment> for NewAppointmentRow<'a> {
    fn from(appointment: &'a Appointment) -> Self {
        Self {
            id: *appointment.id.as_uuid(),
            patient_name: &appointment.patient_name,
            email: appointment.email.as_deref(),
            phone: &appointment.phone,
            doctor_id: appointment.doctor.map(|id| *id.as_uuid()),
            doctor_name: appointment.doctor_name.as_deref(),
            appointment_date: appointment.appointment_date,
            appointment_time: &appointment.appointment_time,
            reason: appointment.reason.as_deref(),
            status: appointment.status.as_str(),
            is_walk_in: appointment.is_walk_in,
            notes: &appointment.notes,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

/// Partial appointment update. Outer `None` skips a column; `Some(None)`
/// writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = appointments)]
pub(crate) struct AppointmentChangeset<'a> {
    pub patient_name: Option<&'a str>,
    pub email: Option<Option<&'a str>>,
    pub phone: Option<&'a str>,
    pub doctor_id: Option<Option<Uuid>>,
    pub doctor_name: Option<Option<&'a str>>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub appointment_time: Option<&'a str>,
    pub reason: Option<Option<&'a str>>,
    pub status: Option<&'static str>,
    pub is_walk_in: Option<bool>,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> AppointmentChangeset<'a> {
    pub fn from_patch(patch: &'a AppointmentPatch, at: DateTime<Utc>) -> Self {
        Self {
            patient_name: patch.patient_name.as_deref(),
            email: patch.email.as_ref().map(Option::as_deref),
            phone: patch.phone.as_deref(),
            doctor_id: patch.doctor.map(|doctor| doctor.map(|id| *id.as_uuid())),
            doctor_name: patch.doctor_name.as_ref().map(Option::as_deref),
            appointment_date: patch.appointment_date,
            appointment_time: patch.appointment_time.as_deref(),
            reason: patch.reason.as_ref().map(Option::as_deref),
            status: patch.status.map(|status| status.as_str()),
            is_walk_in: patch.is_walk_in,
            notes: patch.notes.as_deref(),
            updated_at: at,
        }
    }
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub notes: String,
    pub status: String,
    pub total_visits: i32,
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatientRow {
    pub fn into_domain(self) -> Result<Patient, String> {
        Ok(Patient {
            id: PatientId::from_uuid(self.id),
            gender: self
                .gender
                .as_deref()
                .map(|raw| decode("gender", raw))
                .transpose()?,
            status: decode("status", &self.status)?,
            total_visits: visits_from_db(self.total_visits)?,
            name: self.name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            blood_group: self.blood_group,
            notes: self.notes,
            last_visit: self.last_visit,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patients)]
pub(crate) struct NewPatientRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<&'a str>,
    pub gender: Option<&'static str>,
    pub blood_group: Option<&'a str>,
    pub notes: &'a str,
    pub status: &'static str,
    pub total_visits: i32,
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Patient> for NewPatientRow<'a> {
    fn from(patient: &'a Patient) -> Self {
        Self {
            id: *patient.id.as_uuid(),
            name: &patient.name,
            email: patient.email.as_deref(),
            phone: patient.phone.as_deref(),
            date_of_birth: patient.date_of_birth,
            address: patient.address.as_deref(),
            gender: patient.gender.map(|gender| gender.as_str()),
            blood_group: patient.blood_group.as_deref(),
            notes: &patient.notes,
            status: patient.status.as_str(),
            total_visits: visits_to_db(patient.total_visits),
            last_visit: patient.last_visit,
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = patients)]
pub(crate) struct PatientChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<Option<&'a str>>,
    pub phone: Option<Option<&'a str>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub address: Option<Option<&'a str>>,
    pub gender: Option<Option<&'static str>>,
    pub blood_group: Option<Option<&'a str>>,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PatientChangeset<'a> {
    pub fn from_patch(patch: &'a PatientPatch, at: DateTime<Utc>) -> Self {
        Self {
            name: patch.name.as_deref(),
            email: patch.email.as_ref().map(Option::as_deref),
            phone: patch.phone.as_ref().map(Option::as_deref),
            date_of_birth: patch.date_of_birth,
            address: patch.address.as_ref().map(Option::as_deref),
            gender: patch.gender.map(|gender| gender.map(|value| value.as_str())),
            blood_group: patch.blood_group.as_ref().map(Option::as_deref),
            notes: patch.notes.as_deref(),
            updated_at: at,
        }
    }
}

/// Visit aggregates written by the ledger.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = patients)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct VisitTallyChangeset {
    pub total_visits: i32,
    pub last_visit: Option<DateTime<Utc>>,
    pub status: &'static str,
    pub updated_at: DateTime<Utc>,
}

impl VisitTallyChangeset {
    pub fn new(tally: &VisitTally, at: DateTime<Utc>) -> Self {
        Self {
            total_visits: visits_to_db(tally.total_visits),
            last_visit: tally.last_visit,
            status: tally.status.as_str(),
            updated_at: at,
        }
    }
}

// ---------------------------------------------------------------------------
// Website content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct DoctorRow {
    pub id: Uuid,
    pub name: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Doctor> for DoctorRow {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: *doctor.id.as_uuid(),
            name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            bio: doctor.bio.clone(),
            photo: doctor.photo.clone(),
            is_active: doctor.is_active,
            created_at: doctor.created_at,
            updated_at: doctor.updated_at,
        }
    }
}

impl From<DoctorRow> for Doctor {
    fn from(row: DoctorRow) -> Self {
        Self {
            id: DoctorId::from_uuid(row.id),
            name: row.name,
            specialty: row.specialty,
            bio: row.bio,
            photo: row.photo,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub patient_name: String,
    pub message: String,
    pub rating: i16,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: *review.id.as_uuid(),
            patient_name: review.patient_name.clone(),
            message: review.message.clone(),
            rating: i16::from(review.rating),
            is_approved: review.is_approved,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl ReviewRow {
    pub fn into_domain(self) -> Result<Review, String> {
        let rating = u8::try_from(self.rating)
            .map_err(|_| format!("unexpected rating value in storage: {}", self.rating))?;
        Ok(Review {
            id: ReviewId::from_uuid(self.id),
            patient_name: self.patient_name,
            message: self.message,
            rating,
            is_approved: self.is_approved,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = blog_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BlogPostRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&BlogPost> for BlogPostRow {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: *post.id.as_uuid(),
            title: post.title.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            is_published: post.is_published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: BlogPostId::from_uuid(row.id),
            title: row.title,
            content: row.content,
            image: row.image,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = contact_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactMessageRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ContactMessage> for ContactMessageRow {
    fn from(message: &ContactMessage) -> Self {
        Self {
            id: *message.id.as_uuid(),
            full_name: message.full_name.clone(),
            email: message.email.clone(),
            phone: message.phone.clone(),
            message: message.message.clone(),
            is_read: message.is_read,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

impl From<ContactMessageRow> for ContactMessage {
    fn from(row: ContactMessageRow) -> Self {
        Self {
            id: ContactMessageId::from_uuid(row.id),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
