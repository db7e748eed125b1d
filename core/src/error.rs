//! Error types for the crossword API client.
//!
//! # Design
//! The client does not build its own taxonomy of remote failures. A non-2xx
//! response lands in `Http` with the raw status and body exactly as received,
//! and a transport failure keeps the underlying message.

use thiserror::Error;

use crate::types::CrosswordResponse;

/// Errors returned by `CrosswordClient` and `Crossword::execute`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the envelope.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The endpoint URL could not be built from the configured host.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of a remote rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decode the body of an `Http` error as the service's error envelope.
    ///
    /// Returns `None` for other variants or when the body is not an envelope.
    pub fn remote_envelope(&self) -> Option<CrosswordResponse> {
        match self {
            ApiError::Http { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

impl From<crate::transport::TransportError> for ApiError {
    fn from(err: crate::transport::TransportError) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Errors from loading `ClientOptions` out of the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
