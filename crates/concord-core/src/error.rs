//! Unified error types for the Concord core crate.
//!
//! This module provides standardized error types used across core components.
//! Interaction-level errors (like state violations) are defined in
//! concord-client on top of these.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors that can occur in transport operations.
///
/// The core never interprets status codes or retries; transport failures are
/// propagated unchanged to the caller.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request could not be sent at all.
    #[error("failed to send request: {0}")]
    SendFailed(String),

    /// The remote API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The request payload could not be encoded.
    #[error("failed to encode payload: {0}")]
    Encode(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Invalid configuration.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Cache Errors
// =============================================================================

/// Errors that can occur while materializing entities from raw payloads.
#[derive(Debug, Clone, Error)]
pub enum EntityError {
    /// A raw attribute bag failed to deserialize into the target entity.
    #[error("failed to materialize {kind}: {reason}")]
    Materialize {
        /// Entity kind, e.g. `"member"`.
        kind: &'static str,
        /// Reason for failure.
        reason: String,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for entity materialization.
pub type EntityResult<T> = Result<T, EntityError>;
