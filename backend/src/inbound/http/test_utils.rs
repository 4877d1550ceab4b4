//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockAccessGate, MockAppointmentCommand, MockAppointmentQuery, MockBlogCatalogue,
    MockContactInbox, MockDoctorDirectory, MockPatientDirectory, MockReviewBoard,
    MockStaffAccounts,
};
use crate::domain::{Identity, Role};
use crate::test_support::staff_user;

use super::state::{HttpState, HttpStatePorts};

/// Header value accepted by [`TestPorts::signed_in_as`].
pub const TEST_BEARER: &str = "Bearer test-token";

/// Mock port bundle; unset expectations panic when hit.
#[derive(Default)]
pub struct TestPorts {
    pub access: MockAccessGate,
    pub staff: MockStaffAccounts,
    pub appointments: MockAppointmentCommand,
    pub appointments_query: MockAppointmentQuery,
    pub patients: MockPatientDirectory,
    pub doctors: MockDoctorDirectory,
    pub reviews: MockReviewBoard,
    pub blog: MockBlogCatalogue,
    pub contact: MockContactInbox,
}

impl TestPorts {
    /// Resolve every bearer token to an active account holding `role`.
    pub fn signed_in_as(mut self, role: Role) -> Self {
        let user = staff_user(role.as_str(), role);
        self.access
            .expect_resolve()
            .returning(move |_| Ok(Identity::Staff(user.clone())));
        self
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            access: Arc::new(self.access),
            staff: Arc::new(self.staff),
            appointments: Arc::new(self.appointments),
            appointments_query: Arc::new(self.appointments_query),
            patients: Arc::new(self.patients),
            doctors: Arc::new(self.doctors),
            reviews: Arc::new(self.reviews),
            blog: Arc::new(self.blog),
            contact: Arc::new(self.contact),
        }))
    }
}
