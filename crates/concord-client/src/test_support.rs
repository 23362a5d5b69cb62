//! Shared fixtures for unit tests: an in-memory transport that records
//! requests instead of hitting the network, and canned gateway payloads.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use concord_core::{Endpoint, Multipart, RequestBody, Transport, TransportError, TransportResult};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub endpoint: String,
    pub body: RequestBody,
}

impl RecordedRequest {
    /// Returns the JSON body, panicking if the request was not plain JSON.
    pub fn json(&self) -> Value {
        match &self.body {
            RequestBody::Json(value) => value.clone(),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    /// Returns the multipart body, if any.
    pub fn multipart(&self) -> Option<&Multipart> {
        match &self.body {
            RequestBody::Multipart(multipart) => Some(multipart),
            _ => None,
        }
    }
}

/// Transport double that records every request and answers with a fixed
/// message payload. [`fail_next`](Self::fail_next) makes the next request
/// fail with a send error without recording it.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    fail_next: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot failure for the next request.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Snapshot of the requests recorded so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    fn record(
        &self,
        method: &'static str,
        endpoint: Endpoint,
        body: RequestBody,
    ) -> TransportResult<Value> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(TransportError::SendFailed("mock failure".to_string()));
        }
        self.requests.lock().push(RecordedRequest {
            method,
            endpoint: endpoint.to_string(),
            body,
        });
        // A message shape satisfies every operation that reads the response.
        Ok(json!({"id": "900", "content": "canned"}))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, endpoint: Endpoint) -> TransportResult<Value> {
        self.record("GET", endpoint, RequestBody::Empty)
    }

    async fn post(&self, endpoint: Endpoint, body: RequestBody) -> TransportResult<Value> {
        self.record("POST", endpoint, body)
    }

    async fn patch(&self, endpoint: Endpoint, body: RequestBody) -> TransportResult<Value> {
        self.record("PATCH", endpoint, body)
    }

    async fn delete(&self, endpoint: Endpoint) -> TransportResult<Value> {
        self.record("DELETE", endpoint, RequestBody::Empty)
    }
}

/// Minimal payload of the given interaction type, without context fields.
pub fn payload_of_type(kind: u8) -> Value {
    json!({
        "id": "1",
        "application_id": "2",
        "type": kind,
        "token": "tok",
        "version": 1
    })
}

/// An application command payload sent from a guild channel.
pub fn command_payload(guild_id: &str, channel_id: &str) -> Value {
    json!({
        "id": "1",
        "application_id": "2",
        "type": 2,
        "token": "tok",
        "version": 1,
        "guild_id": guild_id,
        "channel_id": channel_id,
        "member": {"user": {"id": "42", "username": "embedded"}},
        "data": {"id": "500", "name": "greet"}
    })
}

/// A message component payload carrying the message it was attached to.
pub fn component_payload(guild_id: &str, channel_id: &str) -> Value {
    json!({
        "id": "1",
        "application_id": "2",
        "type": 3,
        "token": "tok",
        "version": 1,
        "guild_id": guild_id,
        "channel_id": channel_id,
        "member": {"user": {"id": "42", "username": "embedded"}},
        "message": {"id": "900", "channel_id": channel_id, "content": "click me"},
        "data": {"custom_id": "btn", "component_type": 2}
    })
}
