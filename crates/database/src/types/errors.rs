//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DatabaseError {
    /// Whether the error means the store itself could not be reached.
    pub fn is_connection(&self) -> bool {
        matches!(self, DatabaseError::ConnectionError(_))
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DatabaseError::ConnectionError(error.to_string())
            }
            sqlx::Error::Migrate(inner) => DatabaseError::MigrationError(inner.to_string()),
            other => DatabaseError::QueryError(other.to_string()),
        }
    }
}

impl From<mongodb::error::Error> for DatabaseError {
    fn from(error: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match error.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => {
                DatabaseError::ConnectionError(error.to_string())
            }
            _ => DatabaseError::QueryError(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        DatabaseError::SerializationError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeouts_are_connection_errors() {
        let error = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert!(error.is_connection());
    }

    #[tokio::test]
    async fn invalid_mongodb_arguments_are_query_errors() {
        let error = mongodb::options::ClientOptions::parse("mongodb://localhost/?maxPoolSize=lots")
            .await
            .unwrap_err();
        assert!(matches!(
            error.kind.as_ref(),
            mongodb::error::ErrorKind::InvalidArgument { .. }
        ));

        let error = DatabaseError::from(error);

        assert!(matches!(error, DatabaseError::QueryError(_)), "unexpected: {error}");
    }

    #[test]
    fn row_not_found_is_a_query_error() {
        let error = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, DatabaseError::QueryError(_)));
    }
}
