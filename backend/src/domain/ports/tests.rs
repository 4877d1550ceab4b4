//! Regression coverage for generated port errors.
use super::*;
use rstest::rstest;

#[rstest]
fn user_persistence_error_names_duplicate() {
    let err = UserPersistenceError::duplicate_username("doctor");
    assert_eq!(err.to_string(), "username already exists: doctor");
}

#[rstest]
#[case(AppointmentRepositoryError::connection("pool closed").to_string(), "appointment repository connection failed: pool closed")]
#[case(PatientRepositoryError::query("syntax").to_string(), "patient repository query failed: syntax")]
#[case(TokenCodecError::expired().to_string(), "token expired")]
#[case(TokenCodecError::invalid("bad signature").to_string(), "token rejected: bad signature")]
fn port_errors_render_their_context(#[case] rendered: String, #[case] expected: &str) {
    assert_eq!(rendered, expected);
}
