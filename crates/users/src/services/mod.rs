//! Business logic services for user management.

pub mod user_service;

pub use user_service::UserService;
