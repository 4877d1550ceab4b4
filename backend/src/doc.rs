//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler and the health probes, the
//! error envelope schemas from [`crate::inbound::http::schemas`], and the
//! bearer-token security scheme.
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::envelope::MessageResponse;
use crate::inbound::http::health::ServiceIndex;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::{appointments, blog, contact, doctors, health, patients, reviews, staff};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name under which the bearer scheme is registered.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/auth/login or /api/auth/signup.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Doctors Cares clinic API",
        description = "Appointments, patients, staff accounts, and website content for the clinic."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        health::index,
        health::ready,
        health::live,
        staff::signup,
        staff::login,
        staff::me,
        staff::list_users,
        staff::delete_user,
        appointments::book,
        appointments::register_walk_in,
        appointments::list,
        appointments::today,
        appointments::stats,
        appointments::get_one,
        appointments::update_status,
        appointments::update,
        appointments::delete_one,
        patients::list,
        patients::get_one,
        patients::create,
        patients::update,
        patients::delete_one,
        doctors::list,
        doctors::get_one,
        doctors::create,
        doctors::update,
        doctors::delete_one,
        reviews::submit,
        reviews::list_approved,
        reviews::list_all,
        reviews::approve,
        reviews::delete_one,
        blog::list_published,
        blog::list_all,
        blog::get_one,
        blog::create,
        blog::update,
        blog::delete_one,
        contact::receive,
        contact::list,
        contact::mark_read,
        contact::delete_one,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, MessageResponse, ServiceIndex)),
    tags(
        (name = "auth", description = "Staff accounts and bearer tokens"),
        (name = "appointments", description = "Booking, walk-ins, and the appointment lifecycle"),
        (name = "patients", description = "Patient files and visit history"),
        (name = "doctors", description = "Doctor profiles"),
        (name = "reviews", description = "Patient reviews and moderation"),
        (name = "blog", description = "Website blog posts"),
        (name = "contact", description = "Contact form inbox"),
        (name = "health", description = "Service banner and health probes")
    )
)]
pub struct ApiDoc;
