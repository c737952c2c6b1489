//! Shared types for the user management system.

pub mod errors;

pub use errors::{UserError, UserResult};
