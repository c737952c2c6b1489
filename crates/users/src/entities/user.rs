//! User entity definitions

use natter_database::Entity;
use serde::{Deserialize, Serialize};

use crate::types::UserError;
use crate::utils::validation::{
    validate_bio, validate_display_name, validate_email, validate_url, validate_username,
};

/// A user account document from the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
}

/// Request for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl CreateUserRequest {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            display_name: None,
            avatar_url: None,
            bio: None,
        }
    }

    pub fn validate(&self) -> Result<(), UserError> {
        validate_username(&self.username)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(display_name) = &self.display_name {
            validate_display_name(display_name)?;
        }
        if let Some(avatar_url) = &self.avatar_url {
            validate_url(avatar_url)?;
        }
        if let Some(bio) = &self.bio {
            validate_bio(bio)?;
        }
        Ok(())
    }
}

/// Request for updating an existing user.
///
/// Absent fields are left untouched on the stored document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.display_name.is_none()
            && self.avatar_url.is_none()
            && self.bio.is_none()
    }

    pub fn validate(&self) -> Result<(), UserError> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(display_name) = &self.display_name {
            validate_display_name(display_name)?;
        }
        if let Some(avatar_url) = &self.avatar_url {
            validate_url(avatar_url)?;
        }
        if let Some(bio) = &self.bio {
            validate_bio(bio)?;
        }
        Ok(())
    }
}
