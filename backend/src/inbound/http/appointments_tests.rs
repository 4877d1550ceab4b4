//! Tests for appointment handlers.

use super::*;
use crate::domain::{
    AppointmentStatus, AppointmentValidationError, MISSING_TOKEN_MESSAGE, Role,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::test_utils::{TEST_BEARER, TestPorts};
use crate::test_support::fixture_instant;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn appointment() -> Appointment {
    let now = fixture_instant();
    Appointment {
        id: AppointmentId::random(),
        patient_name: "Jane Doe".into(),
        email: Some("jane@x.com".into()),
        phone: "555".into(),
        doctor: None,
        doctor_name: None,
        appointment_date: now,
        appointment_time: "10:00 AM".into(),
        reason: None,
        status: AppointmentStatus::Pending,
        is_walk_in: false,
        notes: String::new(),
        created_at: now,
        updated_at: now,
    }
}

async fn send(ports: TestPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(ports.into_state())
            .configure(configure_api),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

fn staff_ports() -> TestPorts {
    TestPorts::default().signed_in_as(Role::Receptionist)
}

#[rstest]
#[actix_web::test]
async fn booking_accepts_short_date_and_time_names(appointment: Appointment) {
    let mut ports = TestPorts::default();
    ports
        .appointments
        .expect_book()
        .withf(|draft| {
            draft.appointment_date.as_deref() == Some("2025-06-10")
                && draft.appointment_time.as_deref() == Some("10:00 AM")
        })
        .times(1)
        .return_once(move |_| Ok(appointment));
    let request = actix_test::TestRequest::post()
        .uri("/api/appointments")
        .set_json(json!({
            "patientName": "Jane Doe",
            "email": "jane@x.com",
            "phone": "555",
            "date": "2025-06-10",
            "time": "10:00 AM"
        }));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["message"],
        "Appointment booked successfully! We will confirm it shortly."
    );
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["isWalkIn"], false);
}

#[rstest]
#[actix_web::test]
async fn booking_validation_failures_are_bad_requests() {
    let mut ports = TestPorts::default();
    ports
        .appointments
        .expect_book()
        .returning(|_| Err(AppointmentValidationError::IncompleteBooking.into()));
    let request = actix_test::TestRequest::post()
        .uri("/api/appointments")
        .set_json(json!({"patientName": "Jane Doe"}));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Please fill in all required fields: name, email, phone, date, and time."
    );
    assert_eq!(body["success"], false);
}

#[rstest]
#[actix_web::test]
async fn walk_ins_require_a_token() {
    let request = actix_test::TestRequest::post()
        .uri("/api/appointments/walkin")
        .set_json(json!({"patientName": "Bob", "phone": "01700", "appointmentTime": "11:30 AM"}));
    let (status, body) = send(TestPorts::default(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], MISSING_TOKEN_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn walk_ins_are_created(mut appointment: Appointment) {
    appointment.status = AppointmentStatus::Confirmed;
    appointment.is_walk_in = true;
    let mut ports = staff_ports();
    ports
        .appointments
        .expect_register_walk_in()
        .withf(|draft| draft.phone.as_deref() == Some("01700") && draft.date.is_none())
        .return_once(move |_| Ok(appointment));
    let request = actix_test::TestRequest::post()
        .uri("/api/appointments/walkin")
        .insert_header((AUTHORIZATION, TEST_BEARER))
        .set_json(json!({"patientName": "Bob", "phone": "01700", "appointmentTime": "11:30 AM"}));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Walk-in patient registered!");
    assert_eq!(body["data"]["status"], "confirmed");
}

#[rstest]
#[actix_web::test]
async fn listing_forwards_every_filter(appointment: Appointment) {
    let mut ports = staff_ports();
    ports
        .appointments_query
        .expect_list()
        .withf(|filter| {
            filter.status.as_deref() == Some("Pending")
                && filter.start_date.as_deref() == Some("2025-06-01")
                && filter.end_date.as_deref() == Some("2025-06-30")
                && filter.search.as_deref() == Some("jane")
        })
        .return_once(move |_| Ok(vec![appointment]));
    let request = actix_test::TestRequest::get()
        .uri("/api/appointments?status=Pending&startDate=2025-06-01&endDate=2025-06-30&search=jane")
        .insert_header((AUTHORIZATION, TEST_BEARER));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["patientName"], "Jane Doe");
}

#[rstest]
#[actix_web::test]
async fn today_is_not_mistaken_for_an_id() {
    let mut ports = staff_ports();
    ports
        .appointments_query
        .expect_today()
        .times(1)
        .returning(|| Ok(Vec::new()));
    let request = actix_test::TestRequest::get()
        .uri("/api/appointments/today")
        .insert_header((AUTHORIZATION, TEST_BEARER));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[rstest]
#[actix_web::test]
async fn stats_use_camel_case_counters() {
    let mut ports = staff_ports();
    ports.appointments_query.expect_stats().returning(|| {
        Ok(AppointmentStats {
            total_today: 4,
            waiting: 2,
            late: 1,
            cancelled: 0,
            total_patients: 9,
        })
    });
    let request = actix_test::TestRequest::get()
        .uri("/api/appointments/stats")
        .insert_header((AUTHORIZATION, TEST_BEARER));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"totalToday": 4, "waiting": 2, "late": 1, "cancelled": 0, "totalPatients": 9})
    );
}

#[rstest]
#[actix_web::test]
async fn status_updates_echo_the_new_status(mut appointment: Appointment) {
    let id = appointment.id;
    appointment.status = AppointmentStatus::Completed;
    let mut ports = staff_ports();
    ports
        .appointments
        .expect_update_status()
        .withf(move |target, status| *target == id && status == "completed")
        .return_once(move |_, _| Ok(appointment));
    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/appointments/{id}/status"))
        .insert_header((AUTHORIZATION, TEST_BEARER))
        .set_json(json!({"status": "completed"}));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Status updated to completed.");
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::delete(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn malformed_ids_are_not_found(#[case] request: actix_test::TestRequest) {
    let request = request
        .uri("/api/appointments/64b7f0c2e4b0a1a2b3c4d5e6")
        .insert_header((AUTHORIZATION, TEST_BEARER));
    let (status, body) = send(staff_ports(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Appointment not found.");
}

#[rstest]
#[actix_web::test]
async fn deleting_reports_success() {
    let id = AppointmentId::random();
    let mut ports = staff_ports();
    ports
        .appointments
        .expect_delete()
        .withf(move |target| *target == id)
        .returning(|_| Ok(()));
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/appointments/{id}"))
        .insert_header((AUTHORIZATION, TEST_BEARER));
    let (status, body) = send(ports, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Appointment deleted."}));
}
