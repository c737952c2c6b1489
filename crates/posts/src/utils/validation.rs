//! Validation rules for post fields.

use crate::types::{PostError, PostResult};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_CONTENT_CHARS: usize = 10_000;

pub fn validate_author_id(author_id: &str) -> PostResult<()> {
    if author_id.trim().is_empty() {
        return Err(PostError::ValidationFailed("author_id cannot be empty".to_string()));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> PostResult<()> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(PostError::ValidationFailed(format!(
            "title must be at most {MAX_TITLE_CHARS} characters long"
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> PostResult<()> {
    if content.trim().is_empty() {
        return Err(PostError::ValidationFailed("content cannot be empty".to_string()));
    }

    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(PostError::ValidationFailed(format!(
            "content must be at most {MAX_CONTENT_CHARS} characters long"
        )));
    }
    Ok(())
}
