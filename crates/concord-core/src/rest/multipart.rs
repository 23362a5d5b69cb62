//! Multipart request encoding.
//!
//! Attachment-bearing sends split the payload into binary file parts plus a
//! `payload_json` part carrying the same JSON a plain request would post as
//! its body. The two paths must serialize identically, so the interaction
//! layer serializes the payload once and hands the bytes to
//! [`Multipart::payload_json`].

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::builder::MessageBuilder;
use crate::error::{TransportError, TransportResult};

/// Name of the part carrying the structured payload.
pub const PAYLOAD_JSON: &str = "payload_json";

// =============================================================================
// Part
// =============================================================================

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Form field name.
    pub name: String,
    /// File name, present for file parts only.
    pub filename: Option<String>,
    /// `Content-Type` of the part, if any.
    pub content_type: Option<String>,
    /// Part body bytes.
    pub body: Vec<u8>,
}

// =============================================================================
// Multipart
// =============================================================================

/// A `multipart/form-data` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Multipart {
    boundary: String,
    parts: Vec<Part>,
}

impl Multipart {
    /// Creates an empty envelope with a unique boundary.
    pub fn new() -> Self {
        // Process-unique sequence keeps boundaries distinct without an RNG
        // dependency. Collision with part bytes is not guarded against.
        static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            boundary: format!("concord-boundary-{seq:016x}"),
            parts: Vec::new(),
        }
    }

    /// Creates an envelope with the file parts of a builder.
    ///
    /// Files are named `files[0]`, `files[1]`, … in attachment order.
    pub fn from_builder(builder: &MessageBuilder) -> Self {
        let mut multipart = Self::new();
        for (index, file) in builder.files().iter().enumerate() {
            multipart.add_part(Part {
                name: format!("files[{index}]"),
                filename: Some(file.filename.clone()),
                content_type: Some(file.content_type.clone()),
                body: file.content.clone(),
            });
        }
        multipart
    }

    /// Appends a part.
    pub fn add_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Attaches the structured payload as the `payload_json` part.
    ///
    /// The part carries `Content-Type: application/json` and exactly the
    /// bytes a non-multipart request would send as its body.
    pub fn payload_json(&mut self, payload: &Value) -> TransportResult<()> {
        let body =
            serde_json::to_vec(payload).map_err(|e| TransportError::Encode(e.to_string()))?;
        self.add_part(Part {
            name: PAYLOAD_JSON.to_string(),
            filename: None,
            content_type: Some("application/json".to_string()),
            body,
        });
        Ok(())
    }

    /// Returns the parts added so far.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Returns the part with the given form field name.
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Returns the value for the request `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encodes the envelope into the raw request body.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(b"--");
            out.extend_from_slice(self.boundary.as_bytes());
            out.extend_from_slice(b"\r\n");
            match &part.filename {
                Some(filename) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                            part.name, filename
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    out.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                            .as_bytes(),
                    );
                }
            }
            if let Some(content_type) = &part.content_type {
                out.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            out.extend_from_slice(b"\r\n");
            out.extend_from_slice(&part.body);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"--");
        out.extend_from_slice(self.boundary.as_bytes());
        out.extend_from_slice(b"--\r\n");
        out
    }
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}
