//! Blog handlers. Published posts are public; staff see drafts; admins
//! write.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BlogPost, BlogPostDraft, BlogPostId, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::{Envelope, MessageResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostBody {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

impl From<BlogPostBody> for BlogPostDraft {
    fn from(body: BlogPostBody) -> Self {
        Self {
            title: body.title,
            content: body.content,
            image: body.image,
            is_published: body.is_published,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostRecordBody {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPost> for BlogPostRecordBody {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            image: post.image,
            is_published: post.is_published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

fn listing(posts: Vec<BlogPost>) -> HttpResponse {
    let body: Vec<BlogPostRecordBody> = posts.into_iter().map(Into::into).collect();
    Envelope::list(body).ok()
}

/// Published posts, newest first.
#[utoipa::path(
    get,
    path = "/api/blog",
    responses((status = 200, description = "Published posts", body = Envelope<Vec<BlogPostRecordBody>>)),
    tags = ["blog"],
    operation_id = "listPublishedPosts",
    security([])
)]
#[get("")]
pub async fn list_published(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(listing(state.blog.list(true).await?))
}

/// Every post including drafts.
#[utoipa::path(
    get,
    path = "/api/blog/all",
    responses(
        (status = 200, description = "All posts", body = Envelope<Vec<BlogPostRecordBody>>),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["blog"],
    operation_id = "listAllPosts"
)]
#[get("/all")]
pub async fn list_all(
    state: web::Data<HttpState>,
    _caller: Authenticated,
) -> ApiResult<HttpResponse> {
    Ok(listing(state.blog.list(false).await?))
}

#[utoipa::path(
    get,
    path = "/api/blog/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = Envelope<BlogPostRecordBody>),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blog"],
    operation_id = "getPost",
    security([])
)]
#[get("/{id}")]
pub async fn get_one(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: BlogPostId = parse_path_id(&path, "Blog post not found")?;
    let post = state.blog.get(&id).await?;
    Ok(Envelope::data(BlogPostRecordBody::from(post)).ok())
}

#[utoipa::path(
    post,
    path = "/api/blog",
    request_body = BlogPostBody,
    responses(
        (status = 201, description = "Post created", body = Envelope<BlogPostRecordBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["blog"],
    operation_id = "createPost"
)]
#[post("")]
pub async fn create(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<BlogPostBody>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let post = state.blog.create(payload.into_inner().into()).await?;
    Ok(Envelope::data(BlogPostRecordBody::from(post))
        .with_message("Blog post created!")
        .created())
}

#[utoipa::path(
    put,
    path = "/api/blog/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = BlogPostBody,
    responses(
        (status = 200, description = "Post updated", body = Envelope<BlogPostRecordBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blog"],
    operation_id = "updatePost"
)]
#[put("/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<BlogPostBody>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let id: BlogPostId = parse_path_id(&path, "Post not found")?;
    let post = state.blog.update(&id, payload.into_inner().into()).await?;
    Ok(Envelope::data(BlogPostRecordBody::from(post))
        .with_message("Post updated!")
        .ok())
}

#[utoipa::path(
    delete,
    path = "/api/blog/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blog"],
    operation_id = "deletePost"
)]
#[delete("/{id}")]
pub async fn delete_one(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(&[Role::Admin])?;
    let id: BlogPostId = parse_path_id(&path, "Post not found")?;
    state.blog.delete(&id).await?;
    Ok(Envelope::message("Post deleted.").ok())
}
