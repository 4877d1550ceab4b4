//! Behaviour coverage for the appointment lifecycle service.
use super::*;
use crate::domain::ports::{
    AppointmentRepositoryError, MockAppointmentRepository, MockPatientRepository,
};
use crate::domain::{ErrorCode, Patient, PatientId, PatientStatus};
use crate::test_support::{fixed_clock, fixture_instant};
use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};

fn service(
    appointments: MockAppointmentRepository,
    patients: MockPatientRepository,
) -> AppointmentService {
    AppointmentService::new(Arc::new(appointments), Arc::new(patients), fixed_clock())
}

#[fixture]
fn walk_in_draft() -> WalkInDraft {
    WalkInDraft {
        patient_name: Some("Jane Doe".into()),
        phone: Some("555-1111".into()),
        appointment_time: Some("10:00".into()),
        ..WalkInDraft::default()
    }
}

#[fixture]
fn stored() -> Appointment {
    Appointment::from_walk_in(
        WalkInDraft {
            patient_name: Some("Jane Doe".into()),
            phone: Some("555-1111".into()),
            appointment_time: Some("10:00".into()),
            ..WalkInDraft::default()
        },
        AppointmentId::random(),
        fixture_instant(),
    )
    .expect("valid walk-in")
}

#[rstest]
#[tokio::test]
async fn booking_with_missing_fields_stores_nothing() {
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_insert().never();

    let err = service(appointments, MockPatientRepository::new())
        .book(BookingDraft {
            patient_name: Some("Jane Doe".into()),
            phone: Some("555-1111".into()),
            ..BookingDraft::default()
        })
        .await
        .expect_err("incomplete booking");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.message(),
        "Please fill in all required fields: name, email, phone, date, and time."
    );
}

#[rstest]
#[tokio::test]
async fn walk_in_confirms_and_opens_patient_file(walk_in_draft: WalkInDraft) {
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_insert()
        .withf(|appointment| {
            appointment.status == AppointmentStatus::Confirmed
                && appointment.is_walk_in
                && appointment.appointment_date == fixture_instant()
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut patients = MockPatientRepository::new();
    patients
        .expect_find_first_by_phone()
        .with(eq("555-1111"))
        .return_once(|_| Ok(None));
    patients
        .expect_insert()
        .withf(|patient| patient.total_visits == 1 && patient.status == PatientStatus::New)
        .times(1)
        .return_once(|_| Ok(()));

    let appointment = service(appointments, patients)
        .register_walk_in(walk_in_draft)
        .await
        .expect("walk-in registered");
    assert_eq!(appointment.patient_name, "Jane Doe");
}

#[rstest]
#[tokio::test]
async fn unknown_status_leaves_appointment_untouched() {
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_set_status().never();

    let err = service(appointments, MockPatientRepository::new())
        .update_status(&AppointmentId::random(), "teleported")
        .await
        .expect_err("invalid status");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.message(),
        "Invalid status. Must be one of: pending, confirmed, arrived, waiting, late, completed, cancelled"
    );
}

#[rstest]
#[tokio::test]
async fn completing_counts_a_visit(stored: Appointment) {
    let id = stored.id;
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_set_status()
        .with(eq(id), eq(AppointmentStatus::Completed), always())
        .return_once(move |_, status, _| {
            Ok(Some(Appointment {
                status,
                ..stored
            }))
        });
    let mut patients = MockPatientRepository::new();
    patients
        .expect_record_completion()
        .with(eq("555-1111"), eq(fixture_instant()))
        .times(1)
        .return_once(|_, _| Ok(true));

    let updated = service(appointments, patients)
        .update_status(&id, "completed")
        .await
        .expect("status updated");
    assert_eq!(updated.status, AppointmentStatus::Completed);
}

#[rstest]
#[case("confirmed")]
#[case("cancelled")]
#[case("pending")]
#[tokio::test]
async fn other_statuses_leave_the_ledger_alone(stored: Appointment, #[case] status: &str) {
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_set_status()
        .return_once(move |_, status, _| Ok(Some(Appointment { status, ..stored })));
    let mut patients = MockPatientRepository::new();
    patients.expect_record_completion().never();

    service(appointments, patients)
        .update_status(&AppointmentId::random(), status)
        .await
        .expect("status updated");
}

#[rstest]
#[tokio::test]
async fn status_update_for_missing_appointment_is_not_found() {
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_set_status()
        .return_once(|_, _, _| Ok(None));

    let err = service(appointments, MockPatientRepository::new())
        .update_status(&AppointmentId::random(), "late")
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Appointment not found.");
}

#[rstest]
#[tokio::test]
async fn stats_count_confirmed_as_waiting() {
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_count_within()
        .returning(|_, status| {
            Ok(match status {
                None => 9,
                Some(AppointmentStatus::Confirmed) => 4,
                Some(AppointmentStatus::Late) => 2,
                Some(AppointmentStatus::Cancelled) => 1,
                Some(_) => 0,
            })
        });
    let mut patients = MockPatientRepository::new();
    patients.expect_count().return_once(|| Ok(40));

    let stats = service(appointments, patients)
        .stats()
        .await
        .expect("stats");
    assert_eq!(
        stats,
        AppointmentStats {
            total_today: 9,
            waiting: 4,
            late: 2,
            cancelled: 1,
            total_patients: 40,
        }
    );
}

#[rstest]
#[tokio::test]
async fn today_queries_the_local_day() {
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_list_within()
        .withf(|window| window.contains(&fixture_instant()))
        .return_once(|_| Ok(Vec::new()));

    let listed = service(appointments, MockPatientRepository::new())
        .today()
        .await
        .expect("today");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn store_connection_failures_are_unavailable() {
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_id()
        .return_once(|_| Err(AppointmentRepositoryError::connection("pool timed out")));

    let err = service(appointments, MockPatientRepository::new())
        .get(&AppointmentId::random())
        .await
        .expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(err.message(), "pool timed out");
}

#[rstest]
#[tokio::test]
async fn walk_in_for_returning_patient_promotes_them(walk_in_draft: WalkInDraft) {
    let existing = Patient::first_walk_in(
        PatientId::random(),
        "Jane Doe".into(),
        None,
        "555-1111".into(),
        fixture_instant(),
    );
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_insert().return_once(|_| Ok(()));
    let mut patients = MockPatientRepository::new();
    patients
        .expect_find_first_by_phone()
        .return_once(move |_| Ok(Some(existing)));
    patients
        .expect_save_tally()
        .withf(|_, tally, at| {
            tally.total_visits == 2
                && tally.status == PatientStatus::Regular
                && tally.last_visit == Some(*at)
        })
        .times(1)
        .return_once(|_, _, _| Ok(()));

    service(appointments, patients)
        .register_walk_in(walk_in_draft)
        .await
        .expect("walk-in registered");
}
