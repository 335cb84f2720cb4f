//! Error types for FreeScout API operations.

use thiserror::Error;

/// Errors that can occur during FreeScout API operations.
#[derive(Debug, Error)]
pub enum FreeScoutError {
    /// Configuration is missing or incomplete.
    #[error("FreeScout configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument cannot be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// API request failed with a non-success status.
    #[error("FreeScout API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
        /// Raw response body, if it could be read.
        body: Option<String>,
    },

    /// The knowledge base module answered but reported failure.
    #[error("Knowledge base unavailable: {0}")]
    KbUnavailable(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl FreeScoutError {
    /// HTTP status code of a failed API response, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FreeScoutError::ApiError { status_code, .. } => *status_code,
            FreeScoutError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for FreeScout operations.
pub type Result<T> = core::result::Result<T, FreeScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_code() {
        let err = FreeScoutError::ApiError {
            message: "Not found".to_string(),
            status_code: Some(404),
            body: None,
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = FreeScoutError::ConfigMissing("FREESCOUT_API_KEY".to_string());
        assert_eq!(err.status_code(), None);
        assert!(err.to_string().contains("FREESCOUT_API_KEY"));
    }
}
