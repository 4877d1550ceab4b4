//! Input validation failures surface as `invalid_request` with their own
//! client-facing message.

use super::{
    AppointmentValidationError, BlogValidationError, ContactValidationError, DoctorValidationError,
    Error, LoginValidationError, PatientValidationError, ReviewValidationError,
    SignupValidationError,
};

macro_rules! validation_error_into_domain {
    ($($error:ty),* $(,)?) => {
        $(
            impl From<$error> for Error {
                fn from(error: $error) -> Self {
                    Error::invalid_request(error.to_string())
                }
            }
        )*
    };
}

validation_error_into_domain!(
    AppointmentValidationError,
    PatientValidationError,
    DoctorValidationError,
    ReviewValidationError,
    BlogValidationError,
    ContactValidationError,
    LoginValidationError,
    SignupValidationError,
);
