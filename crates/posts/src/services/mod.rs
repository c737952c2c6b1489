//! Business logic services for posts.

pub mod post_service;

pub use post_service::PostService;
