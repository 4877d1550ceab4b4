//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};
use tracing::info;

use clinic_backend::Trace;
#[cfg(debug_assertions)]
use clinic_backend::doc::ApiDoc;
use clinic_backend::inbound::http::configure_api;
use clinic_backend::inbound::http::health::{HealthState, live, ready};
use clinic_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const CORS_MAX_AGE_SECS: usize = 3600;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

/// Browser clients may call from any origin with a bearer token.
fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(CORS_MAX_AGE_SECS)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.repositories, &config.token_secret);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
        .wrap(cors_policy())
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "clinic API listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::{Method, StatusCode};
    use actix_web::test::{self, TestRequest};
    use clinic_backend::outbound::ClinicRepositories;
    use clinic_backend::outbound::security::TokenSecret;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    #[fixture]
    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(
                &ClinicRepositories::in_memory(),
                &TokenSecret::ephemeral(),
            ),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn serves_the_api_index_with_a_trace_header(deps: AppDependencies) {
        let app = test::init_service(build_app(deps).wrap(cors_policy())).await;
        let res = test::call_service(&app, TestRequest::get().uri("/api").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Doctors Cares API v2.0 is running!");
    }

    #[rstest]
    #[actix_web::test]
    async fn probes_are_mounted_outside_the_api_scope(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;
        let res = test::call_service(
            &app,
            TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn preflight_allows_authorised_cross_origin_calls(deps: AppDependencies) {
        let app = test::init_service(build_app(deps).wrap(cors_policy())).await;
        let req = TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/appointments")
            .insert_header((header::ORIGIN, "https://clinic.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("https://clinic.example")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn protected_routes_reject_anonymous_callers(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;
        let res = test::call_service(
            &app,
            TestRequest::get().uri("/api/appointments").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
