//! Input normalization shared by the services.

use validator::{ValidateEmail, ValidateUrl};

use saveurl_core::error::AppError;

/// Trim and lower-case an email address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize an email address and check its syntax.
pub fn require_email(raw: &str) -> Result<String, AppError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if !email.as_str().validate_email() {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(email)
}

/// Whether `url` is a well-formed absolute URL.
pub fn is_valid_url(url: &str) -> bool {
    url.validate_url()
}

/// Trimmed text, or `None` when it is absent or blank.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Comma-separated tags with blanks dropped and each tag trimmed.
pub fn normalize_tags(value: Option<&str>) -> Option<String> {
    let tags: Vec<&str> = value?
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(", "))
    }
}
