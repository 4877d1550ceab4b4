//! Process-local implementations of every clinic repository port.
//!
//! [`InMemoryStore`] backs the server when no database URL is configured and
//! drives the behaviour suites. Each collection sits behind its own mutex.
//! Multi-step updates such as completion bookkeeping run under a single lock
//! so they stay atomic.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, BlogRepository, BlogRepositoryError,
    ContactRepository, ContactRepositoryError, DoctorRepository, DoctorRepositoryError,
    PatientRepository, PatientRepositoryError, ReviewRepository, ReviewRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Appointment, AppointmentFilter, AppointmentId, AppointmentPatch, AppointmentStatus, BlogPost,
    BlogPostId, ContactMessage, ContactMessageId, DayWindow, Doctor, DoctorId, Patient, PatientId,
    PatientPatch, PatientStatus, Review, ReviewId, StaffUser, UserId, VisitTally,
    patient_matches_search, schedule_order,
};

/// In-memory clinic database.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<StaffUser>>,
    appointments: Mutex<Vec<Appointment>>,
    patients: Mutex<Vec<Patient>>,
    doctors: Mutex<Vec<Doctor>>,
    reviews: Mutex<Vec<Review>>,
    posts: Mutex<Vec<BlogPost>>,
    messages: Mutex<Vec<ContactMessage>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn guard<'a, T, E>(
    collection: &'a Mutex<Vec<T>>,
    poisoned: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, Vec<T>>, E> {
    collection
        .lock()
        .map_err(|_| poisoned("in-memory store lock poisoned".to_owned()))
}

fn remove_where<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}

fn newest_first<T>(items: &mut [T], created: impl Fn(&T) -> DateTime<Utc>) {
    items.sort_by_key(|item| std::cmp::Reverse(created(item)));
}

fn count_as_u64(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &StaffUser) -> Result<(), UserPersistenceError> {
        let mut users = guard(&self.users, UserPersistenceError::query)?;
        if users
            .iter()
            .any(|existing| existing.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_str(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<StaffUser>, UserPersistenceError> {
        let users = guard(&self.users, UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StaffUser>, UserPersistenceError> {
        let users = guard(&self.users, UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError> {
        let mut users = guard(&self.users, UserPersistenceError::query)?;
        if let Some(user) = users.iter_mut().find(|user| user.id == *id) {
            user.last_login = Some(at);
            user.updated_at = at;
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StaffUser>, UserPersistenceError> {
        let mut users = guard(&self.users, UserPersistenceError::query)?.clone();
        newest_first(&mut users, |user| user.created_at);
        Ok(users)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = guard(&self.users, UserPersistenceError::query)?;
        Ok(remove_where(&mut users, |user| user.id == *id))
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryStore {
    async fn insert(&self, appointment: &Appointment) -> Result<(), AppointmentRepositoryError> {
        guard(&self.appointments, AppointmentRepositoryError::query)?.push(appointment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let appointments = guard(&self.appointments, AppointmentRepositoryError::query)?;
        Ok(appointments.iter().find(|item| item.id == *id).cloned())
    }

    async fn list(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let appointments = guard(&self.appointments, AppointmentRepositoryError::query)?;
        let mut matching: Vec<Appointment> = appointments
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        matching.sort_by(schedule_order);
        Ok(matching)
    }

    async fn list_within(
        &self,
        window: &DayWindow,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let appointments = guard(&self.appointments, AppointmentRepositoryError::query)?;
        let mut matching: Vec<Appointment> = appointments
            .iter()
            .filter(|item| window.contains(&item.appointment_date))
            .cloned()
            .collect();
        matching.sort_by(|left, right| left.appointment_time.cmp(&right.appointment_time));
        Ok(matching)
    }

    async fn count_within(
        &self,
        window: &DayWindow,
        status: Option<AppointmentStatus>,
    ) -> Result<u64, AppointmentRepositoryError> {
        let appointments = guard(&self.appointments, AppointmentRepositoryError::query)?;
        let count = appointments
            .iter()
            .filter(|item| window.contains(&item.appointment_date))
            .filter(|item| status.is_none_or(|wanted| item.status == wanted))
            .count();
        Ok(count_as_u64(count))
    }

    async fn set_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut appointments = guard(&self.appointments, AppointmentRepositoryError::query)?;
        Ok(appointments.iter_mut().find(|item| item.id == *id).map(|item| {
            item.status = status;
            item.updated_at = at;
            item.clone()
        }))
    }

    async fn update(
        &self,
        id: &AppointmentId,
        patch: &AppointmentPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut appointments = guard(&self.appointments, AppointmentRepositoryError::query)?;
        Ok(appointments.iter_mut().find(|item| item.id == *id).map(|item| {
            patch.apply_to(item, at);
            item.clone()
        }))
    }

    async fn delete(&self, id: &AppointmentId) -> Result<bool, AppointmentRepositoryError> {
        let mut appointments = guard(&self.appointments, AppointmentRepositoryError::query)?;
        Ok(remove_where(&mut appointments, |item| item.id == *id))
    }
}

/// Phone numbers are the join key between appointments and patients.
fn has_phone(patient: &Patient, phone: &str) -> bool {
    patient.phone.as_deref() == Some(phone)
}

#[async_trait]
impl PatientRepository for InMemoryStore {
    async fn insert(&self, patient: &Patient) -> Result<(), PatientRepositoryError> {
        guard(&self.patients, PatientRepositoryError::query)?.push(patient.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        let patients = guard(&self.patients, PatientRepositoryError::query)?;
        Ok(patients.iter().find(|patient| patient.id == *id).cloned())
    }

    async fn find_first_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let patients = guard(&self.patients, PatientRepositoryError::query)?;
        Ok(patients
            .iter()
            .filter(|patient| has_phone(patient, phone))
            .min_by_key(|patient| patient.created_at)
            .cloned())
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<Patient>, PatientRepositoryError> {
        let patients = guard(&self.patients, PatientRepositoryError::query)?;
        let mut matching: Vec<Patient> = patients
            .iter()
            .filter(|patient| {
                search
                    .as_deref()
                    .is_none_or(|needle| patient_matches_search(patient, needle))
            })
            .cloned()
            .collect();
        newest_first(&mut matching, |patient| patient.created_at);
        Ok(matching)
    }

    async fn update(
        &self,
        id: &PatientId,
        patch: &PatientPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut patients = guard(&self.patients, PatientRepositoryError::query)?;
        Ok(patients.iter_mut().find(|patient| patient.id == *id).map(|patient| {
            patch.apply_to(patient, at);
            patient.clone()
        }))
    }

    async fn save_tally(
        &self,
        id: &PatientId,
        tally: &VisitTally,
        at: DateTime<Utc>,
    ) -> Result<(), PatientRepositoryError> {
        let mut patients = guard(&self.patients, PatientRepositoryError::query)?;
        if let Some(patient) = patients.iter_mut().find(|patient| patient.id == *id) {
            patient.total_visits = tally.total_visits;
            patient.last_visit = tally.last_visit;
            patient.status = tally.status;
            patient.updated_at = at;
        }
        Ok(())
    }

    async fn record_completion(
        &self,
        phone: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, PatientRepositoryError> {
        let mut patients = guard(&self.patients, PatientRepositoryError::query)?;
        let Some(patient) = patients
            .iter_mut()
            .filter(|patient| has_phone(patient, phone))
            .min_by_key(|patient| patient.created_at)
        else {
            return Ok(false);
        };
        patient.total_visits = patient.total_visits.saturating_add(1);
        patient.last_visit = Some(at);
        patient.status = PatientStatus::Regular;
        patient.updated_at = at;
        Ok(true)
    }

    async fn delete(&self, id: &PatientId) -> Result<bool, PatientRepositoryError> {
        let mut patients = guard(&self.patients, PatientRepositoryError::query)?;
        Ok(remove_where(&mut patients, |patient| patient.id == *id))
    }

    async fn count(&self) -> Result<u64, PatientRepositoryError> {
        let patients = guard(&self.patients, PatientRepositoryError::query)?;
        Ok(count_as_u64(patients.len()))
    }
}

#[async_trait]
impl DoctorRepository for InMemoryStore {
    async fn insert(&self, doctor: &Doctor) -> Result<(), DoctorRepositoryError> {
        guard(&self.doctors, DoctorRepositoryError::query)?.push(doctor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DoctorId) -> Result<Option<Doctor>, DoctorRepositoryError> {
        let doctors = guard(&self.doctors, DoctorRepositoryError::query)?;
        Ok(doctors.iter().find(|doctor| doctor.id == *id).cloned())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Doctor>, DoctorRepositoryError> {
        let doctors = guard(&self.doctors, DoctorRepositoryError::query)?;
        let mut matching: Vec<Doctor> = doctors
            .iter()
            .filter(|doctor| !active_only || doctor.is_active)
            .cloned()
            .collect();
        matching.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(matching)
    }

    async fn save(&self, doctor: &Doctor) -> Result<bool, DoctorRepositoryError> {
        let mut doctors = guard(&self.doctors, DoctorRepositoryError::query)?;
        Ok(match doctors.iter_mut().find(|stored| stored.id == doctor.id) {
            Some(stored) => {
                *stored = doctor.clone();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: &DoctorId) -> Result<bool, DoctorRepositoryError> {
        let mut doctors = guard(&self.doctors, DoctorRepositoryError::query)?;
        Ok(remove_where(&mut doctors, |doctor| doctor.id == *id))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        guard(&self.reviews, ReviewRepositoryError::query)?.push(review.clone());
        Ok(())
    }

    async fn list(&self, approved_only: bool) -> Result<Vec<Review>, ReviewRepositoryError> {
        let reviews = guard(&self.reviews, ReviewRepositoryError::query)?;
        let mut matching: Vec<Review> = reviews
            .iter()
            .filter(|review| !approved_only || review.is_approved)
            .cloned()
            .collect();
        newest_first(&mut matching, |review| review.created_at);
        Ok(matching)
    }

    async fn approve(
        &self,
        id: &ReviewId,
        at: DateTime<Utc>,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut reviews = guard(&self.reviews, ReviewRepositoryError::query)?;
        Ok(reviews.iter_mut().find(|review| review.id == *id).map(|review| {
            review.is_approved = true;
            review.updated_at = at;
            review.clone()
        }))
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewRepositoryError> {
        let mut reviews = guard(&self.reviews, ReviewRepositoryError::query)?;
        Ok(remove_where(&mut reviews, |review| review.id == *id))
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn insert(&self, post: &BlogPost) -> Result<(), BlogRepositoryError> {
        guard(&self.posts, BlogRepositoryError::query)?.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, BlogRepositoryError> {
        let posts = guard(&self.posts, BlogRepositoryError::query)?;
        Ok(posts.iter().find(|post| post.id == *id).cloned())
    }

    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, BlogRepositoryError> {
        let posts = guard(&self.posts, BlogRepositoryError::query)?;
        let mut matching: Vec<BlogPost> = posts
            .iter()
            .filter(|post| !published_only || post.is_published)
            .cloned()
            .collect();
        newest_first(&mut matching, |post| post.created_at);
        Ok(matching)
    }

    async fn save(&self, post: &BlogPost) -> Result<bool, BlogRepositoryError> {
        let mut posts = guard(&self.posts, BlogRepositoryError::query)?;
        Ok(match posts.iter_mut().find(|stored| stored.id == post.id) {
            Some(stored) => {
                *stored = post.clone();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: &BlogPostId) -> Result<bool, BlogRepositoryError> {
        let mut posts = guard(&self.posts, BlogRepositoryError::query)?;
        Ok(remove_where(&mut posts, |post| post.id == *id))
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn insert(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError> {
        guard(&self.messages, ContactRepositoryError::query)?.push(message.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ContactRepositoryError> {
        let mut messages = guard(&self.messages, ContactRepositoryError::query)?.clone();
        newest_first(&mut messages, |message| message.created_at);
        Ok(messages)
    }

    async fn mark_read(
        &self,
        id: &ContactMessageId,
        at: DateTime<Utc>,
    ) -> Result<Option<ContactMessage>, ContactRepositoryError> {
        let mut messages = guard(&self.messages, ContactRepositoryError::query)?;
        Ok(messages.iter_mut().find(|message| message.id == *id).map(|message| {
            message.is_read = true;
            message.updated_at = at;
            message.clone()
        }))
    }

    async fn delete(&self, id: &ContactMessageId) -> Result<bool, ContactRepositoryError> {
        let mut messages = guard(&self.messages, ContactRepositoryError::query)?;
        Ok(remove_where(&mut messages, |message| message.id == *id))
    }
}

#[cfg(test)]
mod tests;
