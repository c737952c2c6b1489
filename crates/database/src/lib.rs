//! Natter Database Crate
//!
//! Document store access for the Natter backend: connection management for
//! the MongoDB and SQLite backends, SQLite migrations, a typed repository over
//! collections, and the connectivity diagnostic.

pub mod connection;
pub mod diagnostics;
pub mod migrations;
pub mod repository;
pub mod store;
pub mod types;

pub use connection::{connect, open_existing, prepare_database, redact};
pub use diagnostics::{check_connectivity, ConnectivityReport};
pub use migrations::run_migrations;
pub use repository::{Entity, Repository};
pub use store::{Backend, DocumentStore, MongoStore, SqliteStore};
pub use types::{DatabaseError, DatabaseResult, Document};

pub use natter_config::DatabaseConfig;
