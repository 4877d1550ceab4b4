//! Behaviour of the in-memory repositories that the services rely on.

use std::sync::Arc;

use chrono::TimeDelta;
use rstest::rstest;

use super::*;
use crate::domain::ports::{AppointmentCommand, AppointmentQuery};
use crate::domain::{AppointmentPatchDraft, AppointmentService, BookingDraft, Role};
use crate::test_support::{fixed_clock, fixture_instant, staff_user};

fn patient_with_phone(name: &str, phone: &str, offset_minutes: i64) -> Patient {
    Patient::first_walk_in(
        PatientId::random(),
        name.to_owned(),
        None,
        phone.to_owned(),
        fixture_instant() + TimeDelta::minutes(offset_minutes),
    )
}

fn appointment_at(name: &str, day_offset: i64, time: &str) -> Appointment {
    let now = fixture_instant();
    Appointment {
        id: AppointmentId::random(),
        patient_name: name.to_owned(),
        email: None,
        phone: "555-0100".to_owned(),
        doctor: None,
        doctor_name: None,
        appointment_date: now + TimeDelta::days(day_offset),
        appointment_time: time.to_owned(),
        reason: None,
        status: AppointmentStatus::Pending,
        is_walk_in: false,
        notes: String::new(),
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[tokio::test]
async fn usernames_are_unique_regardless_of_case() {
    let store = InMemoryStore::new();
    UserRepository::insert(&store, &staff_user("sarah", Role::Receptionist))
        .await
        .expect("first insert");
    let err = UserRepository::insert(&store, &staff_user("SARAH", Role::Doctor))
        .await
        .expect_err("duplicate");
    assert_eq!(err, UserPersistenceError::duplicate_username("SARAH"));
}

#[rstest]
#[tokio::test]
async fn completion_updates_only_the_oldest_phone_match() {
    let store = InMemoryStore::new();
    let older = patient_with_phone("Original", "555-0100", 0);
    let newer = patient_with_phone("Duplicate", "555-0100", 30);
    PatientRepository::insert(&store, &newer).await.expect("insert");
    PatientRepository::insert(&store, &older).await.expect("insert");

    let at = fixture_instant() + TimeDelta::hours(2);
    assert!(store.record_completion("555-0100", at).await.expect("update"));

    let updated = PatientRepository::find_by_id(&store, &older.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(updated.total_visits, 2);
    assert_eq!(updated.last_visit, Some(at));
    assert_eq!(updated.status, PatientStatus::Regular);

    let untouched = PatientRepository::find_by_id(&store, &newer.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(untouched.total_visits, 1);
}

#[rstest]
#[tokio::test]
async fn completion_without_a_patient_reports_no_match() {
    let store = InMemoryStore::new();
    let matched = store
        .record_completion("555-9999", fixture_instant())
        .await
        .expect("update");
    assert!(!matched);
}

#[rstest]
#[tokio::test]
async fn appointment_listing_orders_by_date_then_time() {
    let store = InMemoryStore::new();
    for appointment in [
        appointment_at("Late", 1, "09:00"),
        appointment_at("Afternoon", 0, "14:00"),
        appointment_at("Morning", 0, "08:30"),
    ] {
        AppointmentRepository::insert(&store, &appointment)
            .await
            .expect("insert");
    }
    let names: Vec<String> = AppointmentRepository::list(&store, &AppointmentFilter::default())
        .await
        .expect("list")
        .into_iter()
        .map(|item| item.patient_name)
        .collect();
    assert_eq!(names, ["Morning", "Afternoon", "Late"]);
}

#[rstest]
#[tokio::test]
async fn day_window_counts_respect_status() {
    let store = InMemoryStore::new();
    let mut confirmed = appointment_at("Confirmed", 0, "10:00");
    confirmed.status = AppointmentStatus::Confirmed;
    for appointment in [
        confirmed,
        appointment_at("Pending", 0, "11:00"),
        appointment_at("Tomorrow", 1, "11:00"),
    ] {
        AppointmentRepository::insert(&store, &appointment)
            .await
            .expect("insert");
    }
    let window = DayWindow::containing(&fixture_instant()).expect("window");
    let all = store.count_within(&window, None).await.expect("count");
    let waiting = store
        .count_within(&window, Some(AppointmentStatus::Confirmed))
        .await
        .expect("count");
    assert_eq!((all, waiting), (2, 1));
}

#[rstest]
#[tokio::test]
async fn unknown_ids_are_reported_as_absent() {
    let store = InMemoryStore::new();
    let status = store
        .set_status(
            &AppointmentId::random(),
            AppointmentStatus::Late,
            fixture_instant(),
        )
        .await
        .expect("update");
    assert!(status.is_none());
    assert!(!ReviewRepository::delete(&store, &ReviewId::random())
        .await
        .expect("delete"));
}

fn appointment_service(store: &Arc<InMemoryStore>) -> AppointmentService {
    AppointmentService::new(store.clone(), store.clone(), fixed_clock())
}

#[rstest]
#[tokio::test]
async fn reads_return_the_last_written_patch() {
    let store = Arc::new(InMemoryStore::new());
    let service = appointment_service(&store);
    let booked = service
        .book(BookingDraft {
            patient_name: Some("Jane Doe".into()),
            email: Some("jane@x.com".into()),
            phone: Some("555-1111".into()),
            appointment_date: Some("2025-06-01".into()),
            appointment_time: Some("10:00".into()),
            reason: Some("checkup".into()),
            doctor_name: None,
        })
        .await
        .expect("booking");

    let patched = service
        .update(
            &booked.id,
            AppointmentPatchDraft {
                appointment_time: Some("11:30".into()),
                reason: Some("follow-up".into()),
                notes: Some("bring results".into()),
                ..AppointmentPatchDraft::default()
            },
        )
        .await
        .expect("update");
    let fetched = service.get(&booked.id).await.expect("get");

    assert_eq!(fetched, patched);
    assert_eq!(fetched.appointment_time, "11:30");
    assert_eq!(fetched.reason.as_deref(), Some("follow-up"));
    assert_eq!(fetched.notes, "bring results");
    assert_eq!(fetched.patient_name, "Jane Doe");
    assert_eq!(fetched.status, AppointmentStatus::Pending);
}

#[rstest]
#[tokio::test]
async fn completing_through_the_service_bumps_the_stored_patient() {
    let store = Arc::new(InMemoryStore::new());
    let mut regular = patient_with_phone("Jane Doe", "555-1111", 0);
    regular.total_visits = 3;
    PatientRepository::insert(store.as_ref(), &regular)
        .await
        .expect("insert");
    let mut booked = appointment_at("Jane Doe", 0, "10:00");
    booked.phone = "555-1111".to_owned();
    AppointmentRepository::insert(store.as_ref(), &booked)
        .await
        .expect("insert");

    let service = appointment_service(&store);
    let completed = service
        .update_status(&booked.id, "completed")
        .await
        .expect("status change");
    assert_eq!(completed.status, AppointmentStatus::Completed);

    let patient = PatientRepository::find_by_id(store.as_ref(), &regular.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(patient.total_visits, 4);
    assert_eq!(patient.status, PatientStatus::Regular);
    assert_eq!(patient.last_visit, Some(fixture_instant()));
}
