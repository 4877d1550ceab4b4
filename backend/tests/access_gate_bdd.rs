//! Behaviour tests for bearer-token authentication and role checks.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Only a subset of the shared steps is used here.
#[allow(dead_code)]
#[path = "support/clinic_steps.rs"]
mod clinic_steps;
// Shared world exposes helpers used by other suites.
#[allow(dead_code)]
#[path = "support/clinic_world.rs"]
mod clinic_world;

use actix_web::http::Method;
use chrono::TimeDelta;
use clinic_world::{JsonRequest, WorldFixture, perform_json_request, sign_in};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;

#[fixture]
fn world() -> WorldFixture {
    clinic_world::spawn_world()
}

#[given("a clinic with the default staff accounts")]
fn a_clinic_with_the_default_staff_accounts(world: &WorldFixture) {
    clinic_steps::given_default_staff(&world.world());
}

#[given("the receptionist is signed in")]
fn the_receptionist_is_signed_in(world: &WorldFixture) {
    clinic_steps::given_receptionist_signed_in(&world.world());
}

#[given("{hours} hours pass")]
fn hours_pass(world: &WorldFixture, hours: i64) {
    world.world().borrow().clock.advance(TimeDelta::hours(hours));
}

#[when("the appointment list is requested")]
fn the_appointment_list_is_requested(world: &WorldFixture) {
    perform_json_request(&world.world(), JsonRequest::get("/api/appointments"));
}

#[when("a doctor profile is submitted")]
fn a_doctor_profile_is_submitted(world: &WorldFixture) {
    perform_json_request(
        &world.world(),
        JsonRequest::send(
            Method::POST,
            "/api/doctors",
            json!({ "name": "Dr. Ada Byron", "specialty": "Paediatrics" }),
        ),
    );
}

#[when("the doctor signs in with password {password}")]
fn the_doctor_signs_in_with_password(world: &WorldFixture, password: String) {
    let shared = world.world();
    shared.borrow_mut().bearer = None;
    perform_json_request(
        &shared,
        JsonRequest::send(
            Method::POST,
            "/api/auth/login",
            json!({ "username": "doctor", "password": password.trim_matches('"') }),
        ),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    clinic_steps::then_status_is(&world.world(), status);
}

#[then("the response message is {message}")]
fn the_response_message_is(world: &WorldFixture, message: String) {
    clinic_steps::then_message_is(&world.world(), message.trim_matches('"'));
}

#[then("the error carries the response trace id")]
fn the_error_carries_the_response_trace_id(world: &WorldFixture) {
    clinic_steps::then_error_carries_trace_id(&world.world());
}

#[scenario(path = "tests/features/access_gate.feature")]
fn access_gate_scenarios(world: WorldFixture) {
    drop(world);
}

#[test]
fn signing_in_as_the_seeded_doctor_succeeds() {
    let fixture = clinic_world::spawn_world();
    let shared = fixture.world();
    clinic_steps::given_default_staff(&shared);
    sign_in(&shared, "doctor", "doctor123");
    assert!(shared.borrow().bearer.is_some());
}
