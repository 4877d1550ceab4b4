//! Bearer-token extractors for gated handlers.
//!
//! `Authenticated` runs the access gate and rejects the request when the
//! caller cannot be identified. Role checks happen afterwards in the handler
//! through [`Authenticated::require`], so a `403` is only ever produced for a
//! caller that already passed authentication.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, Identity, MISSING_TOKEN_MESSAGE, Role, authorize};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

/// Identity of a caller holding a valid bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

impl Authenticated {
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    /// Second-stage check: the caller's role must be one of `allowed`.
    pub fn require(&self, allowed: &[Role]) -> Result<&Identity, Error> {
        authorize(self.0.role(), allowed)?;
        Ok(&self.0)
    }
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = http_state(req);
        Box::pin(async move {
            let state = state?;
            let token = token.ok_or_else(|| Error::unauthorized(MISSING_TOKEN_MESSAGE))?;
            let identity = state.access.resolve(&token).await?;
            Ok(Self(identity))
        })
    }
}

/// Identity of the caller when a usable token is present.
///
/// Missing or unusable tokens yield `None` rather than rejecting the
/// request; used by endpoints that are public but behave differently for
/// signed-in staff.
#[derive(Debug, Clone, Default)]
pub struct MaybeAuthenticated(pub Option<Identity>);

impl MaybeAuthenticated {
    pub fn role(&self) -> Option<Role> {
        self.0.as_ref().map(Identity::role)
    }
}

impl FromRequest for MaybeAuthenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = http_state(req);
        Box::pin(async move {
            let Some(token) = token else {
                return Ok(Self(None));
            };
            let state = state?;
            match state.access.resolve(&token).await {
                Ok(identity) => Ok(Self(Some(identity))),
                Err(err) => {
                    debug!(message = err.message(), "ignoring unusable bearer token");
                    Ok(Self(None))
                }
            }
        })
    }
}
