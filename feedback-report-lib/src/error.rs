//! Typed failures for the query, report and notification paths.
//!
//! Degraded data (an unparsable rating, an unknown urgency, a missing date) is never an
//! error; those conditions are absorbed by the aggregator. Everything here is something a
//! caller has to react to.

use thiserror::Error;

pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// A stored value that does not follow the tagged-value wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed value at '{path}': {reason}")]
pub struct DecodingError {
    pub path: String,
    pub reason: String,
}

impl DecodingError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Failure reported by the record store or the report object store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("table '{0}' not found")]
    TableNotFound(String),
    #[error("bucket '{0}' not found")]
    BucketNotFound(String),
    #[error("object '{key}' not found in bucket '{bucket}'")]
    ObjectNotFound { bucket: String, key: String },
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("invalid exclusive start key: {0}")]
    InvalidStartKey(String),
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Whether the failure means the addressed table, bucket or object does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TableNotFound(_) | Self::BucketNotFound(_) | Self::ObjectNotFound { .. })
    }
}

/// A request that cannot be served as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("malformed request: {0}")]
    Malformed(String),
}

/// The notification could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("mail API rejected the message with HTTP status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("mail API request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl FeedbackError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Input(InputError::Malformed(message.into()))
    }

    /// HTTP status an HTTP-shaped caller should see for this failure.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Input(_) => 400,
            Self::Decoding(_) | Self::Store(_) | Self::Delivery(_) => 500,
        }
    }
}
