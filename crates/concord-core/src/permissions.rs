//! Permission bitwise codec.
//!
//! Permissions are a set of named boolean flags, each mapped to a bit index
//! between 0 and 40. Which names are valid depends on where the permission
//! set applies: role permissions, text-channel overwrites and voice-channel
//! overwrites each combine the shared table with their own subset.
//!
//! The named flags are the source of truth; the bitwise value is a derived
//! view. On the wire the bitwise value may arrive as a native integer or as
//! a base-10 string, but it is always *emitted* as a string so consumers
//! limited to 32-bit or floating-point arithmetic never lose the high bits.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

// =============================================================================
// Flag tables
// =============================================================================

/// A permission table: symbolic name to bit index.
pub type PermissionTable = &'static [(&'static str, u8)];

/// Permissions that apply in every context.
pub const ALL_PERMISSIONS: PermissionTable = &[
    ("create_instant_invite", 0),
    ("manage_channels", 4),
    ("view_channel", 10),
    ("manage_roles", 28),
    ("manage_webhooks", 29),
];

/// Permissions that only apply to text channels.
pub const TEXT_PERMISSIONS: PermissionTable = &[
    ("add_reactions", 6),
    ("send_messages", 11),
    ("send_tts_messages", 12),
    ("manage_messages", 13),
    ("embed_links", 14),
    ("attach_files", 15),
    ("read_message_history", 16),
    ("mention_everyone", 17),
    ("use_external_emojis", 18),
    ("use_application_commands", 31),
    ("manage_threads", 34),
    ("create_public_threads", 35),
    ("create_private_threads", 36),
    ("use_external_stickers", 37),
    ("send_messages_in_threads", 38),
];

/// Permissions that only apply to voice channels.
pub const VOICE_PERMISSIONS: PermissionTable = &[
    ("priority_speaker", 8),
    ("stream", 9),
    ("connect", 20),
    ("speak", 21),
    ("mute_members", 22),
    ("deafen_members", 23),
    ("move_members", 24),
    ("use_vad", 25),
    ("request_to_speak", 32),
    ("manage_events", 33),
    ("start_embedded_activities", 39),
];

/// Permissions that can only be applied to roles.
pub const ROLE_PERMISSIONS: PermissionTable = &[
    ("kick_members", 1),
    ("ban_members", 2),
    ("administrator", 3),
    ("manage_guild", 5),
    ("view_audit_log", 7),
    ("view_guild_insights", 19),
    ("change_nickname", 26),
    ("manage_nicknames", 27),
    ("manage_emojis_and_stickers", 30),
    ("manage_events", 33),
    ("moderate_members", 40),
];

// =============================================================================
// PermissionContext
// =============================================================================

/// Selects which flag tables are active for a permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionContext {
    /// Role permissions: shared + role-only flags.
    Role,
    /// Text channel overwrite: shared + text-only flags.
    TextChannel,
    /// Voice channel overwrite: shared + voice-only flags.
    VoiceChannel,
}

impl PermissionContext {
    /// Returns the active tables, the shared table always first.
    pub fn tables(self) -> [PermissionTable; 2] {
        match self {
            Self::Role => [ALL_PERMISSIONS, ROLE_PERMISSIONS],
            Self::TextChannel => [ALL_PERMISSIONS, TEXT_PERMISSIONS],
            Self::VoiceChannel => [ALL_PERMISSIONS, VOICE_PERMISSIONS],
        }
    }
}

// =============================================================================
// Bitwise
// =============================================================================

/// A bitwise permission value as transmitted on the wire.
///
/// Accepts both a native integer and a base-10 numeric string on input,
/// and always serializes as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitwise(pub u64);

impl Bitwise {
    /// Returns whether the bit at `index` is set.
    pub fn test(self, index: u8) -> bool {
        self.0 & (1 << index) != 0
    }
}

impl fmt::Display for Bitwise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Bitwise {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for Bitwise {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl Serialize for Bitwise {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Bitwise {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BitwiseVisitor;

        impl<'de> Visitor<'de> for BitwiseVisitor {
            type Value = Bitwise;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or base-10 string bitwise value")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Bitwise, E> {
                Ok(Bitwise(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Bitwise, E> {
                u64::try_from(value)
                    .map(Bitwise)
                    .map_err(|_| E::custom("negative bitwise value"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Bitwise, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(BitwiseVisitor)
    }
}

// =============================================================================
// Permissions
// =============================================================================

/// A set of named permission flags for a given context.
///
/// All flags in the active tables default to `false`. The set is then
/// populated either flag by flag ([`set`](Self::set)) or from a wire value
/// ([`apply_bitwise`](Self::apply_bitwise)).
#[derive(Debug, Clone, PartialEq)]
pub struct Permissions {
    context: PermissionContext,
    flags: HashMap<&'static str, bool>,
}

impl Permissions {
    /// Creates a permission set with every active flag false.
    pub fn new(context: PermissionContext) -> Self {
        let mut flags = HashMap::new();
        for table in context.tables() {
            for (name, _) in table {
                flags.insert(*name, false);
            }
        }
        Self { context, flags }
    }

    /// Creates a permission set populated from a wire bitwise value.
    pub fn from_bitwise(context: PermissionContext, bitwise: Bitwise) -> Self {
        let mut set = Self::new(context);
        set.apply_bitwise(bitwise);
        set
    }

    /// Returns the context this set applies in.
    pub fn context(&self) -> PermissionContext {
        self.context
    }

    /// Returns a named flag. Names outside the active tables are `false`.
    pub fn get(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Sets a named flag. Names outside the active tables are ignored.
    pub fn set(&mut self, name: &str, value: bool) {
        if let Some(slot) = self.flags.get_mut(name) {
            *slot = value;
        }
    }

    /// Derives the bitwise view: the OR of `1 << bit` over all set flags.
    pub fn bitwise(&self) -> Bitwise {
        let mut bits = 0u64;
        for table in self.context.tables() {
            for (name, bit) in table {
                if self.flags[*name] {
                    bits |= 1 << bit;
                }
            }
        }
        Bitwise(bits)
    }

    /// Repopulates every active flag from a bitwise value.
    ///
    /// Bits outside the active tables are ignored, not errors.
    pub fn apply_bitwise(&mut self, bitwise: Bitwise) {
        for table in self.context.tables() {
            for (name, bit) in table {
                self.flags.insert(*name, bitwise.test(*bit));
            }
        }
    }

    /// Iterates over the flags currently set.
    pub fn enabled(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flags
            .iter()
            .filter(|(_, v)| **v)
            .map(|(name, _)| *name)
    }
}
