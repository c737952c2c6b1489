pub mod post;

pub use post::{CreatePostRequest, Post, UpdatePostRequest};
