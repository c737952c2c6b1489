//! # Natter Posts Crate
//!
//! Post documents for the Natter backend. A post belongs to an author by
//! `author_id`; the reference is stored as given and never resolved.

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{CreatePostRequest, Post, UpdatePostRequest};
pub use services::PostService;
pub use types::{PostError, PostResult};
