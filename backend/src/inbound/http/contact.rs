//! Contact form handlers. Anyone may write in; admins read the inbox.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ContactDraft, ContactMessage, ContactMessageId, Error, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::{Envelope, MessageResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Contact form. Older site builds send `name` instead of `fullName`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl From<ContactBody> for ContactDraft {
    fn from(body: ContactBody) -> Self {
        Self {
            full_name: body.full_name,
            name: body.name,
            email: body.email,
            phone: body.phone,
            message: body.message,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageBody {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactMessageBody {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: message.id.to_string(),
            full_name: message.full_name,
            email: message.email,
            phone: message.phone,
            message: message.message,
            is_read: message.is_read,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

fn message_id(raw: &str) -> Result<ContactMessageId, Error> {
    parse_path_id(raw, "Message not found.")
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactBody,
    responses(
        (status = 201, description = "Message received", body = Envelope<ContactMessageBody>),
        (status = 400, description = "Missing fields", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "sendContactMessage",
    security([])
)]
#[post("")]
pub async fn receive(
    state: web::Data<HttpState>,
    payload: web::Json<ContactBody>,
) -> ApiResult<HttpResponse> {
    let message = state.contact.receive(payload.into_inner().into()).await?;
    Ok(Envelope::data(ContactMessageBody::from(message))
        .with_message("Thank you! Your message has been received.")
        .created())
}

/// Inbox, newest first.
#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "Messages", body = Envelope<Vec<ContactMessageBody>>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "listContactMessages"
)]
#[get("")]
pub async fn list(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let messages = state.contact.list().await?;
    let body: Vec<ContactMessageBody> = messages.into_iter().map(Into::into).collect();
    Ok(Envelope::list(body).ok())
}

#[utoipa::path(
    put,
    path = "/api/contact/{id}/read",
    params(("id" = String, Path, description = "Message identifier")),
    responses(
        (status = 200, description = "Marked as read", body = Envelope<ContactMessageBody>),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "markContactMessageRead"
)]
#[put("/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let message = state.contact.mark_read(&message_id(&path)?).await?;
    Ok(Envelope::data(ContactMessageBody::from(message))
        .with_message("Message marked as read.")
        .ok())
}

#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    params(("id" = String, Path, description = "Message identifier")),
    responses(
        (status = 200, description = "Message deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "deleteContactMessage"
)]
#[delete("/{id}")]
pub async fn delete_one(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    state.contact.delete(&message_id(&path)?).await?;
    Ok(Envelope::message("Message deleted.").ok())
}
