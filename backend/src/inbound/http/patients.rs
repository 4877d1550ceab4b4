//! Patient directory handlers. Every route requires a signed-in caller.
//!
//! Visit counters are maintained by appointment events and cannot be set
//! through these endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Patient, PatientDraft, PatientId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::{Envelope, MessageResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Demographic fields accepted on create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "1990-04-12")]
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    #[schema(example = "female")]
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub notes: Option<String>,
}

impl From<PatientBody> for PatientDraft {
    fn from(body: PatientBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
            date_of_birth: body.date_of_birth,
            address: body.address,
            gender: body.gender,
            blood_group: body.blood_group,
            notes: body.notes,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientListQuery {
    /// Case-insensitive substring over name, phone, and email.
    pub search: Option<String>,
}

/// Stored patient record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecordBody {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub notes: String,
    #[schema(example = "Regular")]
    pub status: String,
    pub total_visits: u32,
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Patient> for PatientRecordBody {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.to_string(),
            name: patient.name,
            email: patient.email,
            phone: patient.phone,
            date_of_birth: patient.date_of_birth,
            address: patient.address,
            gender: patient.gender.map(|gender| gender.as_str().to_owned()),
            blood_group: patient.blood_group,
            notes: patient.notes,
            status: patient.status.as_str().to_owned(),
            total_visits: patient.total_visits,
            last_visit: patient.last_visit,
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

fn patient_id(raw: &str) -> Result<PatientId, Error> {
    parse_path_id(raw, "Patient not found.")
}

/// Newest patients first, optionally narrowed by `search`.
#[utoipa::path(
    get,
    path = "/api/patients",
    params(PatientListQuery),
    responses(
        (status = 200, description = "Patients", body = Envelope<Vec<PatientRecordBody>>),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "listPatients"
)]
#[get("")]
pub async fn list(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    query: web::Query<PatientListQuery>,
) -> ApiResult<HttpResponse> {
    let patients = state.patients.list(query.into_inner().search).await?;
    let body: Vec<PatientRecordBody> = patients.into_iter().map(Into::into).collect();
    Ok(Envelope::list(body).ok())
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient", body = Envelope<PatientRecordBody>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatient"
)]
#[get("/{id}")]
pub async fn get_one(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let patient = state.patients.get(&patient_id(&path)?).await?;
    Ok(Envelope::data(PatientRecordBody::from(patient)).ok())
}

/// Open a patient file by hand.
#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = PatientBody,
    responses(
        (status = 201, description = "Patient registered", body = Envelope<PatientRecordBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("")]
pub async fn create(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    payload: web::Json<PatientBody>,
) -> ApiResult<HttpResponse> {
    let patient = state.patients.register(payload.into_inner().into()).await?;
    Ok(Envelope::data(PatientRecordBody::from(patient))
        .with_message("Patient registered successfully!")
        .created())
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    request_body = PatientBody,
    responses(
        (status = 200, description = "Patient updated", body = Envelope<PatientRecordBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "updatePatient"
)]
#[put("/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<PatientBody>,
) -> ApiResult<HttpResponse> {
    let id = patient_id(&path)?;
    let patient = state.patients.update(&id, payload.into_inner().into()).await?;
    Ok(Envelope::data(PatientRecordBody::from(patient))
        .with_message("Patient updated.")
        .ok())
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "deletePatient"
)]
#[delete("/{id}")]
pub async fn delete_one(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.patients.delete(&patient_id(&path)?).await?;
    Ok(Envelope::message("Patient deleted.").ok())
}
