//! Steps shared by the HTTP behaviour suites.

use serde_json::Value;

use crate::clinic_world::{SharedWorld, last_body_field, seed_default_staff, sign_in};

pub(crate) const RECEPTIONIST: (&str, &str) = ("receptionist", "reception123");

pub(crate) fn given_default_staff(world: &SharedWorld) {
    seed_default_staff(world);
}

pub(crate) fn given_receptionist_signed_in(world: &SharedWorld) {
    let (username, password) = RECEPTIONIST;
    sign_in(world, username, password);
}

pub(crate) fn then_status_is(world: &SharedWorld, status: u16) {
    let ctx = world.borrow();
    assert_eq!(
        ctx.last_status,
        Some(status),
        "unexpected response: {:?}",
        ctx.last_body
    );
}

pub(crate) fn then_message_is(world: &SharedWorld, message: &str) {
    assert_eq!(
        last_body_field(world, "/message").as_str(),
        Some(message),
        "unexpected response: {:?}",
        world.borrow().last_body
    );
}

pub(crate) fn then_error_carries_trace_id(world: &SharedWorld) {
    let ctx = world.borrow();
    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("success").and_then(Value::as_bool), Some(false));
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
}
