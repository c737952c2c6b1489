//! REST API endpoints for the gateway

pub mod health;
pub mod posts;
pub mod users;

use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::GatewayState;

/// Create all `/api` routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(users::create_user_routes())
        .merge(posts::create_post_routes())
}

/// Confirmation returned by DELETE endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: bool,
    pub id: String,
}

impl DeletedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            deleted: true,
            id: id.into(),
        }
    }
}
