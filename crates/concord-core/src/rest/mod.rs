//! REST seams consumed by the interaction layer.
//!
//! The core talks to the platform through the [`Transport`] trait and never
//! constructs URLs or interprets HTTP status codes itself. [`Endpoint`]
//! renders request targets, [`Multipart`] encodes attachment envelopes, and
//! [`RestConfig`] configures concrete implementations (see the
//! `concord-rest` crate for the reqwest-backed one).

mod config;
mod endpoint;
mod multipart;

pub use config::{DEFAULT_API_BASE, RestConfig};
pub use endpoint::Endpoint;
pub use multipart::{Multipart, PAYLOAD_JSON, Part};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportResult;

// =============================================================================
// RequestBody
// =============================================================================

/// The body of an outbound REST request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// A JSON body.
    Json(Value),
    /// A multipart envelope; the transport sends its encoded bytes with the
    /// envelope's `Content-Type` header.
    Multipart(Multipart),
}

// =============================================================================
// Transport
// =============================================================================

/// An asynchronous REST transport.
///
/// Implementations own the base URL, authentication and connection
/// management. They surface non-success responses as
/// [`TransportError`](crate::TransportError) without classification;
/// retries and rate limiting are out of scope.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET request.
    async fn get(&self, endpoint: Endpoint) -> TransportResult<Value>;

    /// Issues a POST request.
    async fn post(&self, endpoint: Endpoint, body: RequestBody) -> TransportResult<Value>;

    /// Issues a PATCH request.
    async fn patch(&self, endpoint: Endpoint, body: RequestBody) -> TransportResult<Value>;

    /// Issues a DELETE request.
    async fn delete(&self, endpoint: Endpoint) -> TransportResult<Value>;
}
