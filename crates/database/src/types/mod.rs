//! Shared types and result types for the database layer

pub mod errors;

pub use errors::DatabaseError;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// A schema-flexible record as exchanged with the document store.
///
/// The store-assigned identifier is always exposed under the `id` key.
pub type Document = serde_json::Map<String, serde_json::Value>;
