//! # Natter Gateway Crate
//!
//! HTTP surface of the Natter backend: REST endpoints for users and posts,
//! a health probe and the OpenAPI document, routed onto the domain services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use natter_gateway::{create_router, GatewayState};
//!
//! let app = create_router(GatewayState::new(store));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use state::GatewayState;

pub use create_router as build_router;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::health::health_check,
        rest::users::list_users,
        rest::users::create_user,
        rest::users::get_user,
        rest::users::update_user,
        rest::users::delete_user,
        rest::posts::list_posts,
        rest::posts::create_post,
        rest::posts::get_post,
        rest::posts::update_post,
        rest::posts::delete_post,
    ),
    components(schemas(
        rest::health::HealthResponse,
        rest::users::UserResponse,
        rest::users::CreateUserPayload,
        rest::users::UpdateUserPayload,
        rest::posts::PostResponse,
        rest::posts::CreatePostPayload,
        rest::posts::UpdatePostPayload,
        rest::DeletedResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "Health", description = "Liveness and store connectivity"),
        (name = "Users", description = "User documents"),
        (name = "Posts", description = "Post documents"),
    )
)]
pub struct ApiDoc;

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .nest("/api", rest::create_rest_routes())
        .route("/health", get(rest::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_document))
        .with_state(state)
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware())
}
