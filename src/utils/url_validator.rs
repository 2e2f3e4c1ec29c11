//! URL validation at the harness boundary.
//!
//! The alias store treats URLs as opaque strings. Syntax checks happen here,
//! before input reaches the store, and the accepted URL is passed on exactly
//! as typed (minus surrounding whitespace) so lookups round-trip byte-for-byte.

use crate::error::AppError;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        AppError::invalid_input(e.to_string())
    }
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input,
/// [`UrlValidationError::InvalidFormat`] for unparsable input,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes such as
/// `javascript:` or `file:`, and [`UrlValidationError::MissingHost`] otherwise.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_url("  https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_url("example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}
