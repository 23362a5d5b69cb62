//! Interaction-level error types.
//!
//! The taxonomy distinguishes *protocol misuse* (the operation is never
//! valid for this kind of interaction) from *state violations* (the
//! operation is valid but called at the wrong time), so callers can react
//! differently. Transport failures pass through unchanged.

use thiserror::Error;

use concord_core::{EntityError, TransportError};

use crate::types::InteractionType;

/// Maximum number of autocomplete choices accepted by the platform.
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

/// Errors produced by interaction operations.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// Protocol misuse: the operation is not valid for this interaction type.
    #[error("{operation} is not valid for {actual:?} interactions")]
    UnsupportedInteractionType {
        /// The attempted operation.
        operation: &'static str,
        /// The interaction's actual type.
        actual: InteractionType,
    },

    /// Protocol misuse: too many autocomplete choices.
    #[error("autocomplete accepts at most {MAX_AUTOCOMPLETE_CHOICES} choices, got {count}")]
    TooManyChoices {
        /// Number of choices supplied.
        count: usize,
    },

    /// State violation: a primary response was already sent.
    #[error("interaction has already been responded to")]
    AlreadyResponded,

    /// State violation: the operation requires a prior primary response.
    #[error("interaction has not been responded to")]
    NotResponded,

    /// Failed to serialize an outbound payload.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A response payload failed to materialize into an entity.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Transport failure, propagated unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for InteractionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl InteractionError {
    /// Whether this is a protocol-misuse error (wrong kind of interaction).
    pub fn is_protocol_misuse(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedInteractionType { .. } | Self::TooManyChoices { .. }
        )
    }

    /// Whether this is a state-violation error (wrong time to call this).
    pub fn is_state_violation(&self) -> bool {
        matches!(self, Self::AlreadyResponded | Self::NotResponded)
    }
}

/// Result type for interaction operations.
pub type InteractionResult<T> = Result<T, InteractionError>;
