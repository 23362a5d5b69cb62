//! Message builder.
//!
//! [`MessageBuilder`] accumulates the fields of an outbound message and
//! serializes to the wire payload. Binary attachments are carried alongside
//! the JSON fields; a builder with attachments must be sent as multipart
//! (see [`crate::rest::Multipart`]), with the JSON fields going into the
//! `payload_json` part instead of the request body.
//!
//! # Example
//!
//! ```rust,ignore
//! use concord_core::MessageBuilder;
//!
//! let builder = MessageBuilder::new()
//!     .content("Attached:")
//!     .file("report.txt", b"contents".to_vec());
//! assert!(builder.requires_multipart());
//! ```

use serde::Serialize;
use serde_json::Value;

/// Flag bit marking a response as visible only to the invoking user.
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

// =============================================================================
// Attachment
// =============================================================================

/// A binary file attached to an outbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// File name presented to the platform.
    pub filename: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
    /// MIME type of the file.
    pub content_type: String,
}

// =============================================================================
// MessageBuilder
// =============================================================================

/// Builder for outbound message payloads.
///
/// Serializing the builder yields exactly the JSON body a non-attachment
/// send would post; attachments never appear in the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageBuilder {
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    /// Whether to read the message aloud.
    #[serde(skip_serializing_if = "Option::is_none")]
    tts: Option<bool>,
    /// Rich embed objects, passed through untyped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<Value>,
    /// Interactive component rows, passed through untyped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<Value>,
    /// Message flags bitfield.
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<u64>,
    /// Attached files, carried outside the JSON payload.
    #[serde(skip)]
    files: Vec<Attachment>,
}

impl MessageBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Marks the message as text-to-speech.
    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Adds an embed object.
    pub fn embed(mut self, embed: Value) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Adds a component row.
    pub fn component(mut self, component: Value) -> Self {
        self.components.push(component);
        self
    }

    /// Attaches a file with a MIME type inferred as `application/octet-stream`.
    pub fn file(self, filename: impl Into<String>, content: Vec<u8>) -> Self {
        self.file_with_type(filename, content, "application/octet-stream")
    }

    /// Attaches a file with an explicit MIME type.
    pub fn file_with_type(
        mut self,
        filename: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        self.files.push(Attachment {
            filename: filename.into(),
            content,
            content_type: content_type.into(),
        });
        self
    }

    /// ORs the given bits into the flags field.
    ///
    /// Used by the interaction layer to set [`EPHEMERAL_FLAG`] on primary
    /// responses and follow-ups. Edits never change visibility, so edit
    /// paths do not call this.
    pub fn add_flags(&mut self, bits: u64) {
        self.flags = Some(self.flags.unwrap_or(0) | bits);
    }

    /// Returns the current flags bitfield.
    pub fn flags(&self) -> Option<u64> {
        self.flags
    }

    /// Returns the attached files.
    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    /// Whether this payload must be sent as a multipart request.
    pub fn requires_multipart(&self) -> bool {
        !self.files.is_empty()
    }
}
