//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the clinic's entities and the rules that govern them,
//! independent of HTTP and storage. Inbound adapters call the driving ports
//! in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Entities: `StaffUser`, `Appointment`, `Patient`, `Doctor`, `Review`,
//!   `BlogPost`, `ContactMessage`.
//! - Services implementing the driving ports, such as `AppointmentService`.

pub mod access;
pub mod appointment;
mod access_gate_service;
mod appointment_service;
pub mod auth;
pub mod blog;
pub mod calendar;
pub mod contact;
mod content_services;
pub mod doctor;
pub mod error;
pub mod patient;
mod patient_directory_service;
pub mod ports;
pub mod record_id;
pub mod review;
mod staff_accounts_service;
pub mod staff_seed;
mod store_errors;
pub mod token;
pub mod trace_id;
pub mod user;
mod validation_errors;
mod visit_ledger;

pub use self::access::{
    INACTIVE_USER_MESSAGE, INVALID_TOKEN_MESSAGE, Identity, MISSING_TOKEN_MESSAGE, authorize,
};
pub use self::access_gate_service::TokenAccessGate;
pub use self::appointment::{
    Appointment, AppointmentFilter, AppointmentFilterDraft, AppointmentPatch,
    AppointmentPatchDraft, AppointmentStats, AppointmentStatus, AppointmentValidationError,
    BookingDraft, StatusFilter, WalkInDraft, schedule_order,
};
pub use self::appointment_service::AppointmentService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, MIN_PASSWORD_LEN, SignupDraft, SignupRequest,
    SignupValidationError,
};
pub use self::blog::{BlogPost, BlogPostDraft, BlogPostPatch, BlogValidationError};
pub use self::calendar::{DayWindow, parse_calendar_date, parse_calendar_instant};
pub use self::contact::{ContactDraft, ContactMessage, ContactValidationError};
pub use self::content_services::{
    BlogCatalogueService, ContactInboxService, DoctorDirectoryService, ReviewBoardService,
};
pub use self::doctor::{Doctor, DoctorDraft, DoctorPatch, DoctorValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::patient::{
    Gender, Patient, PatientDraft, PatientPatch, PatientStatus, PatientValidationError,
    VisitTally, patient_matches_search,
};
pub use self::patient_directory_service::PatientDirectoryService;
pub use self::record_id::{
    AppointmentId, BlogPostId, ContactMessageId, DoctorId, PatientId, ReviewId, UserId,
};
pub use self::review::{MAX_RATING, Review, ReviewDraft, ReviewValidationError};
pub use self::staff_accounts_service::{StaffAccountService, check_signup_creator};
pub use self::staff_seed::{DEFAULT_STAFF, SeedAccount, SeedReport, seed_staff};
pub use self::store_errors::USERNAME_TAKEN_MESSAGE;
pub use self::token::{TOKEN_LIFETIME_HOURS, TokenSubject, token_lifetime};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Role, RoleParseError, StaffUser, normalize_username};
pub use self::visit_ledger::VisitLedger;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use clinic_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
