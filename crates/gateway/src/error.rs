//! Error types for the gateway layer

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use natter_posts::PostError;
use natter_users::UserError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::DatabaseError(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Error kind reported in the `error` field
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "ValidationError",
            GatewayError::NotFound(_) => "NotFoundError",
            GatewayError::ServiceUnavailable(_) => "ConnectionError",
            GatewayError::DatabaseError(_) => "DatabaseError",
            GatewayError::InternalError(_) => "InternalError",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<UserError> for GatewayError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound(id) => GatewayError::NotFound(format!("User not found: {id}")),
            UserError::ValidationFailed(msg) => GatewayError::InvalidRequest(msg),
            UserError::Unavailable(msg) => GatewayError::ServiceUnavailable(msg),
            UserError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<PostError> for GatewayError {
    fn from(error: PostError) -> Self {
        match error {
            PostError::PostNotFound(id) => GatewayError::NotFound(format!("Post not found: {id}")),
            PostError::ValidationFailed(msg) => GatewayError::InvalidRequest(msg),
            PostError::Unavailable(msg) => GatewayError::ServiceUnavailable(msg),
            PostError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

/// Malformed, mistyped or missing JSON bodies are validation failures.
impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}
