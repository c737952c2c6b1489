//! Error types for the user management system.

use natter_database::DatabaseError;
use thiserror::Error;

/// Result type alias for user operations
pub type UserResult<T> = Result<T, UserError>;

/// User-related errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DatabaseError> for UserError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(what) => UserError::UserNotFound(what),
            DatabaseError::ConnectionError(message) => UserError::Unavailable(message),
            other => UserError::DatabaseError(other.to_string()),
        }
    }
}
