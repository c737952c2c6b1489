//! Input validation utilities.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::UserError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid username regex"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid url regex"));

const MAX_BIO_CHARS: usize = 500;

fn invalid(message: &str) -> UserError {
    UserError::ValidationFailed(message.to_string())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), UserError> {
    if email.len() > 255 {
        return Err(invalid("Email too long"));
    }

    if !EMAIL_RE.is_match(email) {
        return Err(invalid("Invalid email format"));
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), UserError> {
    if username.len() < 3 {
        return Err(invalid("Username must be at least 3 characters long"));
    }

    if username.len() > 30 {
        return Err(invalid("Username must be at most 30 characters long"));
    }

    if !USERNAME_RE.is_match(username) {
        return Err(invalid(
            "Username can only contain letters, numbers, underscores, and hyphens",
        ));
    }

    Ok(())
}

/// Validate display name
pub fn validate_display_name(display_name: &str) -> Result<(), UserError> {
    if display_name.trim().is_empty() {
        return Err(invalid("Display name cannot be empty"));
    }

    if display_name.chars().count() > 50 {
        return Err(invalid("Display name must be at most 50 characters long"));
    }

    let disallowed_chars = ['\n', '\r', '\t', '\0'];
    if display_name.chars().any(|c| disallowed_chars.contains(&c)) {
        return Err(invalid("Display name contains invalid characters"));
    }

    Ok(())
}

/// Validate URL format; an empty string clears the field and is allowed
pub fn validate_url(url: &str) -> Result<(), UserError> {
    if url.is_empty() {
        return Ok(());
    }

    if url.len() > 2048 {
        return Err(invalid("URL too long"));
    }

    if !URL_RE.is_match(url) {
        return Err(invalid("Invalid URL format"));
    }

    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), UserError> {
    if bio.chars().count() > MAX_BIO_CHARS {
        return Err(invalid("Bio must be at most 500 characters long"));
    }
    Ok(())
}
