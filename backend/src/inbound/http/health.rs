//! Service banner plus liveness and readiness probes for orchestrators and
//! load balancers.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Banner returned by `GET /api`.
pub const SERVICE_BANNER: &str = "Doctors Cares API v2.0 is running!";

const ENDPOINTS: [(&str, &str); 7] = [
    ("auth", "/api/auth/login | /api/auth/signup"),
    ("doctors", "/api/doctors"),
    ("appointments", "/api/appointments"),
    ("patients", "/api/patients"),
    ("contact", "/api/contact"),
    ("blog", "/api/blog"),
    ("reviews", "/api/reviews"),
];

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Starts live but not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once storage is reachable and migrations have run.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flip both probes while draining on shutdown.
    pub fn mark_unhealthy(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Service banner with the top-level endpoint index.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceIndex {
    #[schema(example = "Doctors Cares API v2.0 is running!")]
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Describe the running service.
#[utoipa::path(
    get,
    path = "/api",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service banner", body = ServiceIndex))
)]
#[get("")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ServiceIndex {
        message: SERVICE_BANNER.to_owned(),
        endpoints: ENDPOINTS
            .into_iter()
            .map(|(name, path)| (name.to_owned(), path.to_owned()))
            .collect(),
    })
}

/// Readiness probe. `200` once the server can take traffic, `503` before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. `200` while alive, `503` once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
