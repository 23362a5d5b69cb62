//! Interaction wire enums and small payload types.
//!
//! Both enums travel as bare integers on the wire, so they convert through
//! `u8` for serde instead of deriving the default externally-tagged form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error for unknown wire discriminator values.
#[derive(Debug, Clone, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownDiscriminator {
    kind: &'static str,
    value: u8,
}

// =============================================================================
// InteractionType
// =============================================================================

/// The kind of inbound interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum InteractionType {
    /// Connectivity check.
    Ping = 1,
    /// A slash command invocation.
    ApplicationCommand = 2,
    /// A button press or select-menu choice on an existing message.
    MessageComponent = 3,
    /// A typing-time autocomplete query for a command option.
    ApplicationCommandAutocomplete = 4,
    /// A modal form submission.
    ModalSubmit = 5,
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for InteractionType {
    type Error = UnknownDiscriminator;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            3 => Ok(Self::MessageComponent),
            4 => Ok(Self::ApplicationCommandAutocomplete),
            5 => Ok(Self::ModalSubmit),
            _ => Err(UnknownDiscriminator {
                kind: "interaction type",
                value,
            }),
        }
    }
}

// =============================================================================
// ResponseType
// =============================================================================

/// The kind of primary response sent back for an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResponseType {
    /// Answer to a ping.
    Pong = 1,
    /// An immediate message reply.
    ChannelMessageWithSource = 4,
    /// A visible "thinking" placeholder, edited later.
    DeferredChannelMessageWithSource = 5,
    /// A silent acknowledgement of a component interaction.
    DeferredUpdateMessage = 6,
    /// Replaces the message the component sits on.
    UpdateMessage = 7,
    /// Autocomplete suggestions.
    ApplicationCommandAutocompleteResult = 8,
}

impl From<ResponseType> for u8 {
    fn from(value: ResponseType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ResponseType {
    type Error = UnknownDiscriminator;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            5 => Ok(Self::DeferredChannelMessageWithSource),
            6 => Ok(Self::DeferredUpdateMessage),
            7 => Ok(Self::UpdateMessage),
            8 => Ok(Self::ApplicationCommandAutocompleteResult),
            _ => Err(UnknownDiscriminator {
                kind: "response type",
                value,
            }),
        }
    }
}

// =============================================================================
// CommandChoice
// =============================================================================

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandChoice {
    /// Display name shown to the user.
    pub name: String,
    /// Value submitted if the choice is picked; string or number.
    pub value: Value,
}

impl CommandChoice {
    /// Creates a choice.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_type_wire_form() {
        let kind: InteractionType = serde_json::from_str("2").unwrap();
        assert_eq!(kind, InteractionType::ApplicationCommand);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "2");
    }

    #[test]
    fn test_unknown_interaction_type_rejected() {
        assert!(serde_json::from_str::<InteractionType>("9").is_err());
    }

    #[test]
    fn test_response_type_values() {
        assert_eq!(u8::from(ResponseType::ChannelMessageWithSource), 4);
        assert_eq!(u8::from(ResponseType::DeferredChannelMessageWithSource), 5);
        assert_eq!(u8::from(ResponseType::DeferredUpdateMessage), 6);
        assert_eq!(u8::from(ResponseType::UpdateMessage), 7);
        assert_eq!(u8::from(ResponseType::ApplicationCommandAutocompleteResult), 8);
    }

    #[test]
    fn test_choice_serializes_flat() {
        let choice = CommandChoice::new("Movies", 42);
        assert_eq!(
            serde_json::to_value(&choice).unwrap(),
            serde_json::json!({"name": "Movies", "value": 42})
        );
    }
}
