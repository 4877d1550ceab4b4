//! Doctor profile handlers. Reads are public; changes are admin-only.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Doctor, DoctorDraft, DoctorId, Error, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::{Envelope, MessageResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorBody {
    #[schema(example = "Dr. John Smith")]
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    /// URL or site-relative path of the profile photo.
    pub photo: Option<String>,
    pub is_active: Option<bool>,
}

impl From<DoctorBody> for DoctorDraft {
    fn from(body: DoctorBody) -> Self {
        Self {
            name: body.name,
            specialty: body.specialty,
            bio: body.bio,
            photo: body.photo,
            is_active: body.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfileBody {
    pub id: String,
    pub name: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Doctor> for DoctorProfileBody {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id.to_string(),
            name: doctor.name,
            specialty: doctor.specialty,
            bio: doctor.bio,
            photo: doctor.photo,
            is_active: doctor.is_active,
            created_at: doctor.created_at,
            updated_at: doctor.updated_at,
        }
    }
}

fn doctor_id(raw: &str) -> Result<DoctorId, Error> {
    parse_path_id(raw, "Doctor not found")
}

/// Active doctors in name order.
#[utoipa::path(
    get,
    path = "/api/doctors",
    responses((status = 200, description = "Active doctors", body = Envelope<Vec<DoctorProfileBody>>)),
    tags = ["doctors"],
    operation_id = "listDoctors",
    security([])
)]
#[get("")]
pub async fn list(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let doctors = state.doctors.list_active().await?;
    let body: Vec<DoctorProfileBody> = doctors.into_iter().map(Into::into).collect();
    Ok(Envelope::list(body).ok())
}

#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identifier")),
    responses(
        (status = 200, description = "Doctor", body = Envelope<DoctorProfileBody>),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "getDoctor",
    security([])
)]
#[get("/{id}")]
pub async fn get_one(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let doctor = state.doctors.get(&doctor_id(&path)?).await?;
    Ok(Envelope::data(DoctorProfileBody::from(doctor)).ok())
}

#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = DoctorBody,
    responses(
        (status = 201, description = "Doctor added", body = Envelope<DoctorProfileBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "createDoctor"
)]
#[post("")]
pub async fn create(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<DoctorBody>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let doctor = state.doctors.create(payload.into_inner().into()).await?;
    Ok(Envelope::data(DoctorProfileBody::from(doctor))
        .with_message("Doctor added successfully!")
        .created())
}

#[utoipa::path(
    put,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identifier")),
    request_body = DoctorBody,
    responses(
        (status = 200, description = "Doctor updated", body = Envelope<DoctorProfileBody>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "updateDoctor"
)]
#[put("/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<DoctorBody>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let id = doctor_id(&path)?;
    let doctor = state.doctors.update(&id, payload.into_inner().into()).await?;
    Ok(Envelope::data(DoctorProfileBody::from(doctor))
        .with_message("Doctor updated!")
        .ok())
}

#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identifier")),
    responses(
        (status = 200, description = "Doctor deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "deleteDoctor"
)]
#[delete("/{id}")]
pub async fn delete_one(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    state.doctors.delete(&doctor_id(&path)?).await?;
    Ok(Envelope::message("Doctor deleted.").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::configure_api;
    use crate::inbound::http::test_utils::{TEST_BEARER, TestPorts};
    use crate::test_support::fixture_instant;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn doctor() -> Doctor {
        Doctor {
            id: DoctorId::random(),
            name: "Dr. John Smith".into(),
            specialty: Some("Cardiology".into()),
            bio: None,
            photo: Some("/images/smith.png".into()),
            is_active: true,
            created_at: fixture_instant(),
            updated_at: fixture_instant(),
        }
    }

    async fn send(ports: TestPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_state())
                .configure(configure_api),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn the_public_list_needs_no_token() {
        let mut ports = TestPorts::default();
        ports
            .doctors
            .expect_list_active()
            .returning(|| Ok(vec![doctor()]));
        let request = actix_test::TestRequest::get().uri("/api/doctors");
        let (status, body) = send(ports, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["photo"], "/images/smith.png");
    }

    #[rstest]
    #[case(Role::Doctor)]
    #[case(Role::Receptionist)]
    #[actix_web::test]
    async fn only_admins_add_doctors(#[case] role: Role) {
        let ports = TestPorts::default().signed_in_as(role);
        let request = actix_test::TestRequest::post()
            .uri("/api/doctors")
            .insert_header((AUTHORIZATION, TEST_BEARER))
            .set_json(json!({"name": "Dr. Who"}));
        let (status, _) = send(ports, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn admins_add_doctors() {
        let mut ports = TestPorts::default().signed_in_as(Role::Admin);
        ports
            .doctors
            .expect_create()
            .withf(|draft| draft.name.as_deref() == Some("Dr. John Smith"))
            .returning(|_| Ok(doctor()));
        let request = actix_test::TestRequest::post()
            .uri("/api/doctors")
            .insert_header((AUTHORIZATION, TEST_BEARER))
            .set_json(json!({"name": "Dr. John Smith", "specialty": "Cardiology"}));
        let (status, body) = send(ports, request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Doctor added successfully!");
        assert_eq!(body["data"]["isActive"], true);
    }
}
