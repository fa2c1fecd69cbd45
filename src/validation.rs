//! Input sanitization and URL validation applied before any check is
//! forwarded to the remote safety API.

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Max URL length supported by most browsers.
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL exceeds {limit} bytes (got {actual})")]
    TooLong { limit: usize, actual: usize },

    #[error("URL is malformed: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Strip surrounding whitespace and ASCII control characters from raw input.
pub fn sanitize(raw: &str) -> String {
    raw.trim().chars().filter(|c| !c.is_control()).collect()
}

/// Sanitize and validate a raw URL string, returning the parsed form.
pub fn validate(raw: &str) -> Result<Url, ValidationError> {
    let cleaned = sanitize(raw);

    if cleaned.is_empty() {
        return Err(ValidationError::Empty);
    }

    if cleaned.len() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong {
            limit: MAX_URL_LENGTH,
            actual: cleaned.len(),
        });
    }

    let parsed = Url::parse(&cleaned).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme(
            parsed.scheme().to_string(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::MissingHost);
    }

    debug!(url = %parsed, "URL validated");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls_accepted() {
        assert!(validate("https://example.com").is_ok());
        assert!(validate("http://example.com/path?q=1#frag").is_ok());
    }

    #[test]
    fn test_sanitize_strips_whitespace_and_controls() {
        assert_eq!(sanitize("  https://example.com\n"), "https://example.com");
        assert_eq!(sanitize("https://exam\x00ple.com"), "https://example.com");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(validate("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_oversize_input_rejected() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_malformed_urls_rejected() {
        assert!(matches!(
            validate("not a url"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            validate("https://"),
            Err(ValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_http_schemes_rejected() {
        assert_eq!(
            validate("ftp://example.com/file"),
            Err(ValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert_eq!(
            validate("javascript:alert(1)"),
            Err(ValidationError::UnsupportedScheme("javascript".to_string()))
        );
        assert_eq!(
            validate("file:///etc/passwd"),
            Err(ValidationError::UnsupportedScheme("file".to_string()))
        );
    }
}
