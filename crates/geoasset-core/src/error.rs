//! Error types for asset ingestion

use thiserror::Error;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Client-caused rejection of an upload
///
/// The `Display` text of each variant is the message returned to clients.
/// Parser details are kept in the variant payload for logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Company identifier or file payload absent
    #[error("Missing required fields")]
    MissingField,

    /// The file payload is not a file object
    #[error("Invalid file format")]
    BadFileType,

    /// Payload is not UTF-8 text or not JSON
    #[error("Invalid file format or structure")]
    MalformedJson(String),

    /// Payload is JSON but not an array of asset-shaped objects
    #[error("Invalid file format or structure")]
    InvalidStructure(String),
}

impl ValidationError {
    /// Parser or schema detail behind the rejection, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ValidationError::MalformedJson(detail) | ValidationError::InvalidStructure(detail) => {
                Some(detail)
            }
            ValidationError::MissingField | ValidationError::BadFileType => None,
        }
    }
}

/// Errors that can occur while ingesting an upload
#[derive(Debug, Error)]
pub enum IngestError {
    /// The upload was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unexpected fault (e.g. reading the payload failed)
    #[error("Internal error: {0}")]
    Internal(String),
}
