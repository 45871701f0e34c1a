//! Endpoint URL validation
//!
//! Checks that a configured service endpoint is a usable absolute HTTP(S) URL.
//! Validation is purely syntactic: no DNS lookups and no network access.

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates a service endpoint URL
///
/// The endpoint must:
/// 1. Parse as an absolute URL
/// 2. Use the `https` scheme, or `http` for local mocks and proxies
/// 3. Have a host
///
/// # Example
/// ```rust
/// use voice_enrollment::utils::url_validation::validate_endpoint_url;
///
/// assert!(validate_endpoint_url("https://dashscope.aliyuncs.com/api/v1/services/audio/tts/customization").is_ok());
/// assert!(validate_endpoint_url("ftp://example.com/upload").is_err());
/// ```
pub fn validate_endpoint_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url.trim())?;

    match parsed.scheme() {
        "https" => {}
        "http" => {
            warn!(endpoint = %parsed, "Endpoint uses plain HTTP, credentials are sent unencrypted");
        }
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_endpoint_accepted() {
        let url = validate_endpoint_url(
            "https://dashscope.aliyuncs.com/api/v1/services/audio/tts/customization",
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("dashscope.aliyuncs.com"));
        assert_eq!(url.path(), "/api/v1/services/audio/tts/customization");
    }

    #[test]
    fn test_http_endpoint_accepted() {
        // Local mock servers run on plain HTTP
        assert!(validate_endpoint_url("http://127.0.0.1:8080/customization").is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert!(validate_endpoint_url("  https://example.com/api \n").is_ok());
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        assert_eq!(
            validate_endpoint_url("ftp://example.com/api"),
            Err(UrlValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            validate_endpoint_url("wss://example.com/api"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(matches!(
            validate_endpoint_url("/api/v1/services"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            validate_endpoint_url(""),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = validate_endpoint_url("ftp://example.com").unwrap_err();
        assert_eq!(
            err.to_string(),
            "URL scheme must be http or https, got: ftp"
        );
    }
}
