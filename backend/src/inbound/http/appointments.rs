//! Appointment handlers: public booking plus the staff-facing lifecycle.
//!
//! ```text
//! POST /api/appointments {"patientName":"Jane Doe","email":"jane@x.com","phone":"555","date":"2025-06-10","time":"10:00 AM"}
//! POST /api/appointments/walkin {"patientName":"Bob","phone":"01700","appointmentTime":"11:30 AM"}
//! GET /api/appointments?status=pending&search=jane
//! PUT /api/appointments/{id}/status {"status":"completed"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Appointment, AppointmentFilterDraft, AppointmentId, AppointmentPatchDraft, AppointmentStats,
    BookingDraft, Error, WalkInDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::{Envelope, MessageResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

const NOT_FOUND_MESSAGE: &str = "Appointment not found.";

/// Public booking form. `date`/`time` are accepted for `appointmentDate`
/// and `appointmentTime`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
    pub patient_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "date")]
    #[schema(example = "2025-06-10")]
    pub appointment_date: Option<String>,
    #[serde(alias = "time")]
    #[schema(example = "10:00 AM")]
    pub appointment_time: Option<String>,
    pub reason: Option<String>,
    pub doctor_name: Option<String>,
}

impl From<BookingBody> for BookingDraft {
    fn from(body: BookingBody) -> Self {
        Self {
            patient_name: body.patient_name,
            email: body.email,
            phone: body.phone,
            appointment_date: body.appointment_date,
            appointment_time: body.appointment_time,
            reason: body.reason,
            doctor_name: body.doctor_name,
        }
    }
}

/// Front-desk walk-in registration. `date` defaults to now.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalkInBody {
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "time")]
    pub appointment_time: Option<String>,
    pub email: Option<String>,
    pub reason: Option<String>,
    pub doctor_name: Option<String>,
    pub date: Option<String>,
}

impl From<WalkInBody> for WalkInDraft {
    fn from(body: WalkInBody) -> Self {
        Self {
            patient_name: body.patient_name,
            phone: body.phone,
            appointment_time: body.appointment_time,
            email: body.email,
            reason: body.reason,
            doctor_name: body.doctor_name,
            date: body.date,
        }
    }
}

/// Status change request.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct StatusBody {
    #[schema(example = "completed")]
    pub status: Option<String>,
}

/// Full appointment update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdateBody {
    pub patient_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub doctor: Option<String>,
    pub doctor_name: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
    pub is_walk_in: Option<bool>,
    pub notes: Option<String>,
}

impl From<AppointmentUpdateBody> for AppointmentPatchDraft {
    fn from(body: AppointmentUpdateBody) -> Self {
        Self {
            patient_name: body.patient_name,
            email: body.email,
            phone: body.phone,
            doctor: body.doctor,
            doctor_name: body.doctor_name,
            appointment_date: body.appointment_date,
            appointment_time: body.appointment_time,
            reason: body.reason,
            status: body.status,
            is_walk_in: body.is_walk_in,
            notes: body.notes,
        }
    }
}

/// Listing filters for `GET /api/appointments`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AppointmentListQuery {
    /// Case-insensitive status; `All` disables the filter and unknown names
    /// match nothing.
    pub status: Option<String>,
    /// Inclusive lower bound on the appointment date.
    pub start_date: Option<String>,
    /// Inclusive upper bound on the appointment date.
    pub end_date: Option<String>,
    /// Substring matched against name, phone, and email.
    pub search: Option<String>,
}

impl From<AppointmentListQuery> for AppointmentFilterDraft {
    fn from(query: AppointmentListQuery) -> Self {
        Self {
            status: query.status,
            start_date: query.start_date,
            end_date: query.end_date,
            search: query.search,
        }
    }
}

/// Stored appointment as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentBody {
    pub id: String,
    pub patient_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub doctor: Option<String>,
    pub doctor_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
    pub reason: Option<String>,
    #[schema(example = "pending")]
    pub status: String,
    pub is_walk_in: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentBody {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id.to_string(),
            patient_name: appointment.patient_name,
            email: appointment.email,
            phone: appointment.phone,
            doctor: appointment.doctor.map(|id| id.to_string()),
            doctor_name: appointment.doctor_name,
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            reason: appointment.reason,
            status: appointment.status.as_str().to_owned(),
            is_walk_in: appointment.is_walk_in,
            notes: appointment.notes,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

/// Dashboard counters for today.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    pub total_today: u64,
    /// Appointments confirmed for today.
    pub waiting: u64,
    pub late: u64,
    pub cancelled: u64,
    pub total_patients: u64,
}

impl From<AppointmentStats> for StatsBody {
    fn from(counts: AppointmentStats) -> Self {
        Self {
            total_today: counts.total_today,
            waiting: counts.waiting,
            late: counts.late,
            cancelled: counts.cancelled,
            total_patients: counts.total_patients,
        }
    }
}

fn bodies(appointments: Vec<Appointment>) -> Vec<AppointmentBody> {
    appointments.into_iter().map(AppointmentBody::from).collect()
}

fn appointment_id(raw: &str) -> Result<AppointmentId, Error> {
    parse_path_id(raw, NOT_FOUND_MESSAGE)
}

/// Book an appointment from the public website.
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = BookingBody,
    responses(
        (status = 201, description = "Appointment booked", body = Envelope<AppointmentBody>),
        (status = 400, description = "Missing required fields", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "bookAppointment",
    security([])
)]
#[post("")]
pub async fn book(
    state: web::Data<HttpState>,
    payload: web::Json<BookingBody>,
) -> ApiResult<HttpResponse> {
    let appointment = state.appointments.book(payload.into_inner().into()).await?;
    Ok(Envelope::data(AppointmentBody::from(appointment))
        .with_message("Appointment booked successfully! We will confirm it shortly.")
        .created())
}

/// Register a walk-in and credit the patient's visit.
#[utoipa::path(
    post,
    path = "/api/appointments/walkin",
    request_body = WalkInBody,
    responses(
        (status = 201, description = "Walk-in registered", body = Envelope<AppointmentBody>),
        (status = 400, description = "Missing required fields", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "registerWalkIn"
)]
#[post("/walkin")]
pub async fn register_walk_in(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    payload: web::Json<WalkInBody>,
) -> ApiResult<HttpResponse> {
    let appointment = state
        .appointments
        .register_walk_in(payload.into_inner().into())
        .await?;
    Ok(Envelope::data(AppointmentBody::from(appointment))
        .with_message("Walk-in patient registered!")
        .created())
}

/// List appointments matching every supplied filter.
#[utoipa::path(
    get,
    path = "/api/appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Matching appointments", body = Envelope<Vec<AppointmentBody>>),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "listAppointments"
)]
#[get("")]
pub async fn list(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    query: web::Query<AppointmentListQuery>,
) -> ApiResult<HttpResponse> {
    let appointments = state
        .appointments_query
        .list(query.into_inner().into())
        .await?;
    Ok(Envelope::list(bodies(appointments)).ok())
}

/// Today's schedule in time order.
#[utoipa::path(
    get,
    path = "/api/appointments/today",
    responses(
        (status = 200, description = "Today's appointments", body = Envelope<Vec<AppointmentBody>>),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "todaysAppointments"
)]
#[get("/today")]
pub async fn today(
    state: web::Data<HttpState>,
    _caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let appointments = state.appointments_query.today().await?;
    Ok(Envelope::list(bodies(appointments)).ok())
}

/// Dashboard counters.
#[utoipa::path(
    get,
    path = "/api/appointments/stats",
    responses(
        (status = 200, description = "Counters for today", body = Envelope<StatsBody>),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "appointmentStats"
)]
#[get("/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    _caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let counts = state.appointments_query.stats().await?;
    Ok(Envelope::data(StatsBody::from(counts)).ok())
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Appointment", body = Envelope<AppointmentBody>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "getAppointment"
)]
#[get("/{id}")]
pub async fn get_one(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let appointment = state.appointments_query.get(&appointment_id(&path)?).await?;
    Ok(Envelope::data(AppointmentBody::from(appointment)).ok())
}

/// Move an appointment to any status. Completion credits a visit.
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/status",
    params(("id" = String, Path, description = "Appointment identifier")),
    request_body = StatusBody,
    responses(
        (status = 200, description = "Status updated", body = Envelope<AppointmentBody>),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "updateAppointmentStatus"
)]
#[put("/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<StatusBody>,
) -> ApiResult<HttpResponse> {
    let id = appointment_id(&path)?;
    let status = payload.into_inner().status.unwrap_or_default();
    let appointment = state.appointments.update_status(&id, &status).await?;
    let message = format!("Status updated to {}.", appointment.status);
    Ok(Envelope::data(AppointmentBody::from(appointment))
        .with_message(message)
        .ok())
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment identifier")),
    request_body = AppointmentUpdateBody,
    responses(
        (status = 200, description = "Appointment updated", body = Envelope<AppointmentBody>),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "updateAppointment"
)]
#[put("/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<AppointmentUpdateBody>,
) -> ApiResult<HttpResponse> {
    let id = appointment_id(&path)?;
    let appointment = state
        .appointments
        .update(&id, payload.into_inner().into())
        .await?;
    Ok(Envelope::data(AppointmentBody::from(appointment))
        .with_message("Appointment updated.")
        .ok())
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Appointment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "deleteAppointment"
)]
#[delete("/{id}")]
pub async fn delete_one(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.appointments.delete(&appointment_id(&path)?).await?;
    Ok(Envelope::message("Appointment deleted.").ok())
}

#[cfg(test)]
#[path = "appointments_tests.rs"]
mod tests;
