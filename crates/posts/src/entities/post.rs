//! Post entity definitions

use natter_database::Entity;
use serde::{Deserialize, Serialize};

use crate::types::PostResult;
use crate::utils::validation::{validate_author_id, validate_content, validate_title};

/// A post document from the `posts` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Post {
    const COLLECTION: &'static str = "posts";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

impl CreatePostRequest {
    pub fn new(author_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            title: None,
            content: content.into(),
        }
    }

    pub fn validate(&self) -> PostResult<()> {
        validate_author_id(&self.author_id)?;
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_content(&self.content)
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn is_empty(&self) -> bool {
        self.author_id.is_none() && self.title.is_none() && self.content.is_none()
    }

    pub fn validate(&self) -> PostResult<()> {
        if let Some(author_id) = &self.author_id {
            validate_author_id(author_id)?;
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}
