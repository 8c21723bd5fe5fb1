use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding submitted form fields into an aggregate.
///
/// Malformed path-keyed lines and unparsable per-folder quota overrides
/// are not errors; they are silently dropped or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DecodeError {
    #[error("invalid value \"{value}\" for field \"{field}\"")]
    MalformedNumber { field: String, value: String },

    #[error("invalid value \"{value}\" for storage field \"{field}\"")]
    StorageVariantField { field: String, value: String },

    #[error("credentials file size must be greater than 0")]
    EmptyCredentialFile,

    #[error("invalid expiration date \"{0}\", expected YYYY-MM-DD HH:MM:SS")]
    DateFormat(String),
}

/// Errors returned by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record \"{0}\" not found")]
    NotFound(String),

    #[error("data provider error: {0}")]
    Provider(String),
}

impl StoreError {
    /// Whether this failure means the looked-up record does not exist,
    /// as opposed to the backend misbehaving.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
