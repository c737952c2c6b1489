//! Post REST endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use natter_posts::{CreatePostRequest, Post, UpdatePostRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, GatewayResult};
use crate::rest::DeletedResponse;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostPayload {
    pub author_id: String,
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostPayload {
    pub author_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<CreatePostPayload> for CreatePostRequest {
    fn from(payload: CreatePostPayload) -> Self {
        Self {
            author_id: payload.author_id,
            title: payload.title,
            content: payload.content,
        }
    }
}

impl From<UpdatePostPayload> for UpdatePostRequest {
    fn from(payload: UpdatePostPayload) -> Self {
        Self {
            author_id: payload.author_id,
            title: payload.title,
            content: payload.content,
        }
    }
}

pub fn create_post_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post)
                .put(update_post)
                .patch(update_post)
                .delete(delete_post),
        )
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    responses(
        (status = 200, description = "Every post", body = Vec<PostResponse>),
        (status = 503, description = "Document store unreachable", body = ErrorResponse)
    )
)]
pub async fn list_posts(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<PostResponse>>> {
    let posts = state.post_service.list_posts().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = CreatePostPayload,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_post(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<CreatePostPayload>, JsonRejection>,
) -> GatewayResult<(StatusCode, Json<PostResponse>)> {
    let Json(payload) = payload?;
    let post = state.post_service.create_post(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
pub async fn get_post(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<PostResponse>> {
    let post = state.post_service.get_post(&id).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    request_body = UpdatePostPayload,
    responses(
        (status = 200, description = "The merged post", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
pub async fn update_post(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostPayload>, JsonRejection>,
) -> GatewayResult<Json<PostResponse>> {
    let Json(payload) = payload?;
    let post = state.post_service.update_post(&id, payload.into()).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = DeletedResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<DeletedResponse>> {
    state.post_service.delete_post(&id).await?;
    Ok(Json(DeletedResponse::new(id)))
}
