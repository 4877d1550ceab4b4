//! Wiring of domain services onto the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use clinic_backend::domain::{
    AppointmentService, BlogCatalogueService, ContactInboxService, DoctorDirectoryService,
    PatientDirectoryService, ReviewBoardService, StaffAccountService, TokenAccessGate,
};
use clinic_backend::inbound::http::state::{HttpState, HttpStatePorts};
use clinic_backend::outbound::ClinicRepositories;
use clinic_backend::outbound::security::{Argon2PasswordHasher, JwtTokenCodec, TokenSecret};

/// Build handler state over `repositories` using the wall clock.
pub(crate) fn build_http_state(
    repositories: &ClinicRepositories,
    secret: &TokenSecret,
) -> web::Data<HttpState> {
    build_http_state_with_clock(repositories, secret, Arc::new(DefaultClock))
}

pub(crate) fn build_http_state_with_clock(
    repositories: &ClinicRepositories,
    secret: &TokenSecret,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let codec = Arc::new(JwtTokenCodec::new(secret, Arc::clone(&clock)));
    let appointments = Arc::new(AppointmentService::new(
        Arc::clone(&repositories.appointments),
        Arc::clone(&repositories.patients),
        Arc::clone(&clock),
    ));

    let ports = HttpStatePorts {
        access: Arc::new(TokenAccessGate::new(
            codec.clone(),
            Arc::clone(&repositories.users),
        )),
        staff: Arc::new(StaffAccountService::new(
            Arc::clone(&repositories.users),
            Arc::new(Argon2PasswordHasher::new()),
            codec,
            Arc::clone(&clock),
        )),
        appointments: appointments.clone(),
        appointments_query: appointments,
        patients: Arc::new(PatientDirectoryService::new(
            Arc::clone(&repositories.patients),
            Arc::clone(&clock),
        )),
        doctors: Arc::new(DoctorDirectoryService::new(
            Arc::clone(&repositories.doctors),
            Arc::clone(&clock),
        )),
        reviews: Arc::new(ReviewBoardService::new(
            Arc::clone(&repositories.reviews),
            Arc::clone(&clock),
        )),
        blog: Arc::new(BlogCatalogueService::new(
            Arc::clone(&repositories.blog),
            Arc::clone(&clock),
        )),
        contact: Arc::new(ContactInboxService::new(
            Arc::clone(&repositories.contact),
            clock,
        )),
    };
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use super::*;

    use clinic_backend::domain::{LoginCredentials, Role, SignupDraft, SignupRequest};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn in_memory_wiring_issues_tokens_the_gate_accepts() {
        let repositories = ClinicRepositories::in_memory();
        let state = build_http_state(&repositories, &TokenSecret::ephemeral());

        let request = SignupRequest::try_from_draft(SignupDraft {
            name: Some("Sarah".into()),
            username: Some("Front.Desk".into()),
            password: Some("reception123".into()),
            role: Some("receptionist".into()),
            email: None,
        })
        .expect("valid signup");
        state
            .staff
            .signup(request, None)
            .await
            .expect("signup succeeds");

        let credentials =
            LoginCredentials::try_from_parts(Some("front.desk"), Some("reception123"))
                .expect("valid credentials");
        let session = state
            .staff
            .login(credentials)
            .await
            .expect("login succeeds");

        let identity = state
            .access
            .resolve(&session.token)
            .await
            .expect("token resolves");
        assert_eq!(identity.role(), Role::Receptionist);
        assert_eq!(identity.username(), "front.desk");
    }
}
