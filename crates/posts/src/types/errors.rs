//! Error types for posts.

use natter_database::DatabaseError;
use thiserror::Error;

pub type PostResult<T> = Result<T, PostError>;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DatabaseError> for PostError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(what) => PostError::PostNotFound(what),
            DatabaseError::ConnectionError(message) => PostError::Unavailable(message),
            other => PostError::DatabaseError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_map_by_kind() {
        assert!(matches!(
            PostError::from(DatabaseError::NotFound("posts/1".into())),
            PostError::PostNotFound(_)
        ));
        assert!(matches!(
            PostError::from(DatabaseError::ConnectionError("refused".into())),
            PostError::Unavailable(_)
        ));
        assert!(matches!(
            PostError::from(DatabaseError::QueryError("syntax".into())),
            PostError::DatabaseError(_)
        ));
    }
}
