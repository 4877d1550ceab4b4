//! Review handlers. Submissions and the approved list are public;
//! moderation is admin-only.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Review, ReviewDraft, ReviewId, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::{Envelope, MessageResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    pub patient_name: Option<String>,
    pub message: Option<String>,
    /// Between 0 and 5; defaults to 0.
    #[schema(example = 5)]
    pub rating: Option<i64>,
}

impl From<ReviewBody> for ReviewDraft {
    fn from(body: ReviewBody) -> Self {
        Self {
            patient_name: body.patient_name,
            message: body.message,
            rating: body.rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecordBody {
    pub id: String,
    pub patient_name: String,
    pub message: String,
    pub rating: u8,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewRecordBody {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_string(),
            patient_name: review.patient_name,
            message: review.message,
            rating: review.rating,
            is_approved: review.is_approved,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

fn listing(reviews: Vec<Review>) -> HttpResponse {
    let body: Vec<ReviewRecordBody> = reviews.into_iter().map(Into::into).collect();
    Envelope::list(body).ok()
}

fn review_id(raw: &str) -> Result<ReviewId, Error> {
    parse_path_id(raw, "Review not found.")
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = ReviewBody,
    responses(
        (status = 201, description = "Review received", body = Envelope<ReviewRecordBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "submitReview",
    security([])
)]
#[post("")]
pub async fn submit(
    state: web::Data<HttpState>,
    payload: web::Json<ReviewBody>,
) -> ApiResult<HttpResponse> {
    let review = state.reviews.submit(payload.into_inner().into()).await?;
    Ok(Envelope::data(ReviewRecordBody::from(review))
        .with_message("Thank you for your review! It will appear after approval.")
        .created())
}

/// Approved reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses((status = 200, description = "Approved reviews", body = Envelope<Vec<ReviewRecordBody>>)),
    tags = ["reviews"],
    operation_id = "listApprovedReviews",
    security([])
)]
#[get("")]
pub async fn list_approved(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(listing(state.reviews.list(true).await?))
}

/// Every review awaiting or past moderation.
#[utoipa::path(
    get,
    path = "/api/reviews/all",
    responses(
        (status = 200, description = "All reviews", body = Envelope<Vec<ReviewRecordBody>>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listAllReviews"
)]
#[get("/all")]
pub async fn list_all(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    Ok(listing(state.reviews.list(false).await?))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}/approve",
    params(("id" = String, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Review approved", body = Envelope<ReviewRecordBody>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "approveReview"
)]
#[put("/{id}/approve")]
pub async fn approve(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let review = state.reviews.approve(&review_id(&path)?).await?;
    Ok(Envelope::data(ReviewRecordBody::from(review))
        .with_message("Review approved!")
        .ok())
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = String, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/{id}")]
pub async fn delete_one(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    state.reviews.delete(&review_id(&path)?).await?;
    Ok(Envelope::message("Review deleted.").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewValidationError;
    use crate::inbound::http::configure_api;
    use crate::inbound::http::test_utils::{TEST_BEARER, TestPorts};
    use crate::test_support::fixture_instant;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn review(is_approved: bool) -> Review {
        Review {
            id: ReviewId::random(),
            patient_name: "Sam".into(),
            message: "Kind staff".into(),
            rating: 5,
            is_approved,
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
    async fn submissions_await_approval() {
        let mut ports = TestPorts::default();
        ports
            .reviews
            .expect_submit()
            .withf(|draft| draft.rating == Some(5))
            .returning(|_| Ok(review(false)));
        let request = actix_test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(json!({"patientName": "Sam", "message": "Kind staff", "rating": 5}));
        let (status, body) = send(ports, request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["message"],
            "Thank you for your review! It will appear after approval."
        );
        assert_eq!(body["data"]["isApproved"], false);
    }

    #[rstest]
    #[actix_web::test]
    async fn submissions_need_a_name_and_message() {
        let mut ports = TestPorts::default();
        ports
            .reviews
            .expect_submit()
            .returning(|_| Err(ReviewValidationError::MissingFields.into()));
        let request = actix_test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(json!({"rating": 3}));
        let (status, body) = send(ports, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Name and message are required.");
    }

    #[rstest]
    #[actix_web::test]
    async fn the_public_list_only_asks_for_approved_reviews() {
        let mut ports = TestPorts::default();
        ports
            .reviews
            .expect_list()
            .withf(|approved_only| *approved_only)
            .returning(|_| Ok(vec![review(true)]));
        let (status, body) =
            send(ports, actix_test::TestRequest::get().uri("/api/reviews")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
    }

    #[rstest]
    #[actix_web::test]
    async fn the_full_list_is_admin_only() {
        let ports = TestPorts::default().signed_in_as(Role::Doctor);
        let request = actix_test::TestRequest::get()
            .uri("/api/reviews/all")
            .insert_header((AUTHORIZATION, TEST_BEARER));
        let (status, _) = send(ports, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn admins_approve_reviews() {
        let mut ports = TestPorts::default().signed_in_as(Role::Admin);
        ports
            .reviews
            .expect_approve()
            .returning(|_| Ok(review(true)));
        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/reviews/{}/approve", ReviewId::random()))
            .insert_header((AUTHORIZATION, TEST_BEARER));
        let (status, body) = send(ports, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Review approved!");
    }
}
