// src/error.rs
//! Codec error types.
//!
//! Every failure the codec can report is a variant here. Unknown block,
//! rich text and mention kinds are not failures: they decode to the
//! `Unsupported` variants and re-encode unchanged.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Listing and retrieval bodies handed to the decoder may be error objects
/// (`{"object": "error", "code": ..., "message": ...}`); the code is mapped
/// here so the transport layer can decide whether to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded, back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// An error code this crate doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError | Self::Conflict
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Errors raised while decoding or encoding block payloads.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input is not valid JSON, lacks a `type` field, or a known
    /// payload has the wrong shape.
    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// One element of a listing failed to decode; the whole page fails.
    #[error("Invalid element at index {index}: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Unknown kinds are read-only and cannot be sent in a write request.
    #[error("Block of unsupported type `{block_type}` cannot be written")]
    UnsupportedInDraft { block_type: String },

    /// The body was an API error object rather than the expected resource.
    #[error("Notion API returned an error ({code}, status {status}): {message}")]
    Api {
        code: NotionErrorCode,
        status: u16,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl CodecError {
    /// The listing index of the failing element, if the error is per-element.
    pub fn element_index(&self) -> Option<usize> {
        match self {
            Self::InvalidElement { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in [
            "rate_limited",
            "object_not_found",
            "validation_error",
            "conflict_error",
            "something_new",
        ] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
    }

    #[test]
    fn retry_classification() {
        assert!(NotionErrorCode::RateLimited.is_retryable());
        assert!(!NotionErrorCode::ValidationFailed.is_retryable());
        assert!(NotionErrorCode::ObjectNotFound.is_not_found());
    }

    #[test]
    fn element_index_is_exposed() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = CodecError::InvalidElement { index: 3, source };
        assert_eq!(err.element_index(), Some(3));
        assert!(err.to_string().contains("index 3"));
    }
}
