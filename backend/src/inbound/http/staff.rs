//! Staff account handlers.
//!
//! ```text
//! POST /api/auth/signup {"name":"Dr. Grey","username":"mgrey","password":"hunter22","role":"doctor"}
//! POST /api/auth/login {"username":"doctor","password":"doctor123"}
//! GET /api/auth/me
//! GET /api/auth/users
//! DELETE /api/auth/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AuthSession;
use crate::domain::{
    Identity, LoginCredentials, Role, SignupDraft, SignupRequest, StaffUser, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Authenticated, MaybeAuthenticated};
use crate::inbound::http::envelope::{Envelope, MessageResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

const STAFF_MANAGERS: [Role; 2] = [Role::Admin, Role::Receptionist];

/// Signup request body for `POST /api/auth/signup`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[schema(example = "doctor")]
    pub role: Option<String>,
    pub email: Option<String>,
}

impl From<SignupBody> for SignupDraft {
    fn from(body: SignupBody) -> Self {
        Self {
            name: body.name,
            username: body.username,
            password: body.password,
            role: body.role,
            email: body.email,
        }
    }
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Account summary returned alongside a freshly issued token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountBody {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    #[schema(example = "receptionist")]
    pub role: String,
}

impl From<&StaffUser> for AccountBody {
    fn from(user: &StaffUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_owned(),
        }
    }
}

/// `{success, message, token, user}` returned by signup and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: AccountBody,
}

impl AuthResponse {
    fn new(message: String, session: &AuthSession) -> Self {
        Self {
            success: true,
            message,
            token: session.token.clone(),
            user: AccountBody::from(&session.user),
        }
    }
}

/// Stored account as listed for staff managers. Never carries the hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffUserBody {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&StaffUser> for StaffUserBody {
    fn from(user: &StaffUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_owned(),
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

/// Caller identity. Legacy tokens only carry a username and role.
#[derive(Debug, Serialize, ToSchema)]
pub struct IdentityBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: String,
}

impl From<&Identity> for IdentityBody {
    fn from(identity: &Identity) -> Self {
        match identity {
            Identity::Staff(user) => Self {
                id: Some(user.id.to_string()),
                name: Some(user.name.clone()),
                username: user.username.clone(),
                email: user.email.clone(),
                role: user.role.as_str().to_owned(),
            },
            Identity::Legacy { username } => Self {
                id: None,
                name: None,
                username: username.clone(),
                email: None,
                role: identity.role().as_str().to_owned(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    pub user: IdentityBody,
}

/// Create a doctor or receptionist account.
///
/// A bearer token, when present and valid, identifies the creator; doctor
/// accounts can only be created by an admin or receptionist.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Creator not permitted", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security((), ("BearerToken" = []))
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    creator: MaybeAuthenticated,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let request = SignupRequest::try_from_draft(payload.into_inner().into())?;
    let role = request.role();
    let session = state.staff.signup(request, creator.role()).await?;
    let message = format!("{} account created successfully!", role.title());
    Ok(HttpResponse::Created().json(AuthResponse::new(message, &session)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Account deactivated", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(body.username.as_deref(), body.password.as_deref())?;
    let session = state.staff.login(credentials).await?;
    let message = format!("Welcome back, {}!", session.user.name);
    Ok(HttpResponse::Ok().json(AuthResponse::new(message, &session)))
}

/// Describe the caller.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn me(caller: Authenticated) -> web::Json<MeResponse> {
    web::Json(MeResponse {
        success: true,
        user: IdentityBody::from(caller.identity()),
    })
}

/// List every staff account, newest first.
#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses(
        (status = 200, description = "Staff accounts", body = Envelope<Vec<StaffUserBody>>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "listStaffUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    caller.require(&STAFF_MANAGERS)?;
    let users = state.staff.list_users().await?;
    let body: Vec<StaffUserBody> = users.iter().map(StaffUserBody::from).collect();
    Ok(Envelope::list(body).ok())
}

/// Remove a staff account.
#[utoipa::path(
    delete,
    path = "/api/auth/users/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "deleteStaffUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(&STAFF_MANAGERS)?;
    let id: UserId = parse_path_id(&path, "User not found.")?;
    state.staff.delete_user(&id).await?;
    Ok(Envelope::message("User deleted.").ok())
}
