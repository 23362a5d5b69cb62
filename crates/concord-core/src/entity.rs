//! Entity models.
//!
//! Entities are deserialized from the raw attribute bags the platform sends.
//! Most fields are optional on the wire, so everything beyond the identity
//! fields defaults to `None`/empty. An entity that was deserialized but not
//! inserted into a cache registry is *detached*: it carries the payload data
//! and nothing else.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{Keyed, Registry};
use crate::error::{EntityError, EntityResult};
use crate::id::Id;

/// Materializes an entity of kind `kind` from a raw attribute bag.
///
/// This is the single construction path for detached entities; resolver code
/// never builds entities field by field.
pub fn materialize<T: serde::de::DeserializeOwned>(kind: &'static str, raw: Value) -> EntityResult<T> {
    serde_json::from_value(raw).map_err(|e| EntityError::Materialize {
        kind,
        reason: e.to_string(),
    })
}

// =============================================================================
// User
// =============================================================================

/// A platform user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: Id,
    /// Account name.
    #[serde(default)]
    pub username: String,
    /// Legacy discriminator tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Whether the account belongs to an application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
    /// Avatar hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Keyed for User {
    fn key(&self) -> &Id {
        &self.id
    }
}

// =============================================================================
// Member
// =============================================================================

/// A user's membership in a guild.
///
/// Keyed by the nested user's id, matching how the platform addresses
/// members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// The underlying user.
    pub user: User,
    /// Guild the membership belongs to. Merged in when the wire payload
    /// carries the member without guild context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id>,
    /// Per-guild nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Role ids held by the member.
    #[serde(default)]
    pub roles: Vec<Id>,
    /// When the member joined, as an ISO-8601 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
    /// Computed permissions in the interaction channel, as a bitwise string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

impl Keyed for Member {
    fn key(&self) -> &Id {
        &self.user.id
    }
}

// =============================================================================
// Channel
// =============================================================================

/// A guild channel or direct-message channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel id.
    pub id: Id,
    /// Channel type discriminator.
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Guild the channel belongs to, absent for DMs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id>,
    /// Channel name, absent for DMs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Keyed for Channel {
    fn key(&self) -> &Id {
        &self.id
    }
}

// =============================================================================
// Guild
// =============================================================================

/// A guild and its per-guild registries.
///
/// The registries are local cache state, not wire data; they start empty and
/// fill as entities are observed.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Guild {
    /// Guild id.
    pub id: Id,
    /// Guild name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Channels observed in this guild.
    #[serde(skip)]
    pub channels: Registry<Channel>,
    /// Members observed in this guild, keyed by user id.
    #[serde(skip)]
    pub members: Registry<Member>,
    /// Live stage instances in this guild.
    #[serde(skip)]
    pub stage_instances: Registry<StageInstance>,
}

impl Keyed for Guild {
    fn key(&self) -> &Id {
        &self.id
    }
}

// =============================================================================
// Message
// =============================================================================

/// A channel message.
///
/// Messages are always materialized detached; their identity is too volatile
/// to be worth cache-checking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    pub id: Id,
    /// Channel the message was sent in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id>,
    /// Guild the message was sent in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id>,
    /// Text content.
    #[serde(default)]
    pub content: String,
    /// Message author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Message flags bitfield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl Keyed for Message {
    fn key(&self) -> &Id {
        &self.id
    }
}

// =============================================================================
// StageInstance
// =============================================================================

/// A live stage instance inside a guild.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageInstance {
    /// Stage instance id.
    pub id: Id,
    /// Owning guild.
    pub guild_id: Id,
    /// Stage channel the instance runs in.
    pub channel_id: Id,
    /// Topic shown to viewers.
    #[serde(default)]
    pub topic: String,
}

impl Keyed for StageInstance {
    fn key(&self) -> &Id {
        &self.id
    }
}
