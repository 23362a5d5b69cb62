//! # Concord Client
//!
//! Interaction handling for the Concord platform client: lazy entity
//! resolution, the one-shot response state machine and cache-feeding
//! gateway event handlers, built on the seams defined in `concord-core`.
//!
//! ## Overview
//!
//! An [`Interaction`] wraps a raw gateway payload together with a shared
//! cache and a transport. Context entities (guild, channel, member, user,
//! message, command data) are resolved lazily on first access and memoized,
//! preferring cached instances over fresh construction from embedded data.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use concord_client::Interaction;
//! use concord_core::{Cache, MessageBuilder};
//!
//! async fn handle(payload: serde_json::Value, cache: Arc<Cache>, transport: Arc<dyn concord_core::Transport>) {
//!     let interaction = Interaction::from_value(payload, cache, transport)?;
//!     if let Some(data) = interaction.data() {
//!         println!("command: {:?}", data.name);
//!     }
//!     interaction
//!         .respond_with_message(MessageBuilder::new().content("pong"), false)
//!         .await?;
//! }
//! ```
//!
//! ## Response Lifecycle
//!
//! ```text
//! UNRESPONDED --(acknowledge / respond_with_message /
//!                update_message / autocomplete_result)--> RESPONDED
//! RESPONDED   --(get/update/delete original, follow-ups)--> RESPONDED
//! ```
//!
//! A second primary response fails with
//! [`InteractionError::AlreadyResponded`]; original-response and follow-up
//! operations before the first response fail with
//! [`InteractionError::NotResponded`].

pub mod error;
pub mod events;
pub mod interaction;
mod response;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{InteractionError, InteractionResult, MAX_AUTOCOMPLETE_CHOICES};
pub use events::{StageInstanceUpdate, stage_instance_update};
pub use interaction::{Interaction, InteractionData, RawInteraction};
pub use types::{CommandChoice, InteractionType, ResponseType, UnknownDiscriminator};
