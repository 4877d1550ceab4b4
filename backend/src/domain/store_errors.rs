//! Conversions from repository port errors into API-facing domain errors.
//!
//! Store messages pass through to the client unchanged. A failed pool
//! checkout becomes `service_unavailable`; everything else is `internal`.

use super::Error;
use super::ports::{
    AppointmentRepositoryError, BlogRepositoryError, ContactRepositoryError,
    DoctorRepositoryError, PatientRepositoryError, ReviewRepositoryError, UserPersistenceError,
};

fn non_blank(message: String) -> String {
    if message.trim().is_empty() {
        "storage request failed".to_owned()
    } else {
        message
    }
}

macro_rules! store_error_into_domain {
    ($($error:ident),* $(,)?) => {
        $(
            impl From<$error> for Error {
                fn from(error: $error) -> Self {
                    match error {
                        $error::Connection { message } => {
                            Error::service_unavailable(non_blank(message))
                        }
                        $error::Query { message } => Error::internal(non_blank(message)),
                    }
                }
            }
        )*
    };
}

store_error_into_domain!(
    AppointmentRepositoryError,
    PatientRepositoryError,
    DoctorRepositoryError,
    ReviewRepositoryError,
    BlogRepositoryError,
    ContactRepositoryError,
);

/// Message returned when a signup collides with an existing username.
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already taken. Please choose another.";

impl From<UserPersistenceError> for Error {
    fn from(error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(non_blank(message))
            }
            UserPersistenceError::Query { message } => Error::internal(non_blank(message)),
            UserPersistenceError::DuplicateUsername { .. } => {
                Error::conflict(USERNAME_TAKEN_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(AppointmentRepositoryError::connection("pool timed out").into(), ErrorCode::ServiceUnavailable)]
    #[case(PatientRepositoryError::query("relation missing").into(), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_username("sarah").into(), ErrorCode::Conflict)]
    fn store_errors_map_to_codes(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn store_messages_pass_through() {
        let error: Error = ReviewRepositoryError::query("duplicate key value").into();
        assert_eq!(error.message(), "duplicate key value");
    }
}
