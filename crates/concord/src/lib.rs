//! # Concord
//!
//! A type-safe chat platform client SDK for Rust.
//!
//! ## Overview
//!
//! Concord wraps the platform's interaction protocol behind three layers:
//! lazy entity resolution over a shared cache, a one-shot response state
//! machine, and a pluggable REST transport.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Your handlers   │
//! ├──────────────────┤
//! │  concord-client  │  Interaction, responses, cache-feeding events
//! ├──────────────────┤
//! │  concord-core    │  Entities, cache, permissions, transport seam
//! ├──────────────────┤
//! │  concord-rest    │  HTTP transport (feature "http-client")
//! └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use concord::prelude::*;
//!
//! async fn on_interaction(payload: serde_json::Value) -> anyhow::Result<()> {
//!     let cache = Arc::new(Cache::new());
//!     let transport = Arc::new(HttpTransport::new(
//!         RestConfig::new().with_token(std::env::var("BOT_TOKEN")?),
//!     )?);
//!
//!     let interaction = Interaction::from_value(payload, cache, transport)?;
//!     interaction
//!         .respond_with_message(MessageBuilder::new().content("pong"), false)
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `http-client`: Enable the reqwest-backed HTTP transport

pub use concord_client as client;
pub use concord_core as core;
pub use concord_rest as rest;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use concord::prelude::*;
/// ```
pub mod prelude {
    // Interactions - primary unit of event handling
    pub use concord_client::{
        CommandChoice, Interaction, InteractionError, InteractionResult, InteractionType,
        ResponseType, StageInstanceUpdate, stage_instance_update,
    };

    // Entities and cache
    pub use concord_core::{
        Cache, Channel, Guild, Id, Member, Message, StageInstance, User,
    };

    // Message construction
    pub use concord_core::{Attachment, MessageBuilder};

    // Permissions
    pub use concord_core::{Bitwise, PermissionContext, Permissions};

    // Transport seam and configuration
    pub use concord_core::{RestConfig, Transport, TransportError, TransportResult};

    // HTTP transport (requires "http-client" feature)
    #[cfg(feature = "http-client")]
    pub use concord_rest::HttpTransport;
}
