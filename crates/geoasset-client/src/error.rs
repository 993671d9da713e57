//! Error types for GeoAsset client operations

use thiserror::Error;

/// Result type alias for GeoAsset client operations
pub type Result<T> = std::result::Result<T, AssetClientError>;

/// Errors that can occur during GeoAsset client operations
#[derive(Error, Debug)]
pub enum AssetClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server returned an error response
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Upload was rejected by the server (HTTP 400)
    #[error("Upload rejected: {0}")]
    Rejected(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,
}

impl AssetClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Message suitable for showing to a user
    ///
    /// For server-side failures this is the `error` text the server sent.
    pub fn user_message(&self) -> String {
        match self {
            Self::ServerError { message, .. } | Self::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_server_text() {
        let err = AssetClientError::Rejected("Invalid file format".into());
        assert_eq!(err.user_message(), "Invalid file format");
        assert_eq!(err.to_string(), "Upload rejected: Invalid file format");

        let err = AssetClientError::server_error(500, "Internal server error");
        assert_eq!(err.user_message(), "Internal server error");
    }
}
