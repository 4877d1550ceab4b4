//! HTTP inbound adapter exposing the clinic REST endpoints under `/api`.

pub mod appointments;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod doctors;
pub mod envelope;
pub mod error;
pub mod health;
pub mod patients;
pub mod reviews;
pub mod schemas;
pub mod staff;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` route plus the shared JSON body configuration.
///
/// Handlers expect `web::Data<HttpState>` to be registered by the caller.
/// Fixed segments (`/walkin`, `/today`, `/all`) are registered before the
/// `/{id}` routes they would otherwise collide with.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use clinic_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config()).service(
        web::scope("/api")
            .service(health::index)
            .service(
                web::scope("/auth")
                    .service(staff::signup)
                    .service(staff::login)
                    .service(staff::me)
                    .service(staff::list_users)
                    .service(staff::delete_user),
            )
            .service(
                web::scope("/appointments")
                    .service(appointments::book)
                    .service(appointments::list)
                    .service(appointments::register_walk_in)
                    .service(appointments::today)
                    .service(appointments::stats)
                    .service(appointments::update_status)
                    .service(appointments::get_one)
                    .service(appointments::update)
                    .service(appointments::delete_one),
            )
            .service(
                web::scope("/patients")
                    .service(patients::list)
                    .service(patients::create)
                    .service(patients::get_one)
                    .service(patients::update)
                    .service(patients::delete_one),
            )
            .service(
                web::scope("/doctors")
                    .service(doctors::list)
                    .service(doctors::create)
                    .service(doctors::get_one)
                    .service(doctors::update)
                    .service(doctors::delete_one),
            )
            .service(
                web::scope("/reviews")
                    .service(reviews::submit)
                    .service(reviews::list_approved)
                    .service(reviews::list_all)
                    .service(reviews::approve)
                    .service(reviews::delete_one),
            )
            .service(
                web::scope("/blog")
                    .service(blog::list_published)
                    .service(blog::list_all)
                    .service(blog::create)
                    .service(blog::get_one)
                    .service(blog::update)
                    .service(blog::delete_one),
            )
            .service(
                web::scope("/contact")
                    .service(contact::receive)
                    .service(contact::list)
                    .service(contact::mark_read)
                    .service(contact::delete_one),
            ),
    );
}
