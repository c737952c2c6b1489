//! # Natter Users Crate
//!
//! User documents for the Natter backend: the `User` entity, its request
//! types, validation rules, and the CRUD service over the `users` collection.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use natter_users::{CreateUserRequest, UserService};
//!
//! let service = UserService::new(store);
//! let user = service.create_user(request).await?;
//! ```

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{CreateUserRequest, UpdateUserRequest, User};
pub use services::UserService;
pub use types::{UserError, UserResult};
