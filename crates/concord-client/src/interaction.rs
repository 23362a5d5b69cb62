//! The interaction view object and its lazy entity resolver.
//!
//! An [`Interaction`] wraps the raw gateway payload together with the
//! injected collaborators it resolves against: the process-wide entity
//! [`Cache`] and the REST [`Transport`]. Derived entities (`guild`,
//! `channel`, `member`, `user`, `message`, `data`) are computed on first
//! access and memoized for the lifetime of the instance; no invalidation
//! protocol exists.
//!
//! Resolution prefers cached instances so that callers holding other
//! references observe the same shared object, and falls back to building a
//! fresh, detached entity from the embedded payload data. Cache registries
//! may be arbitrarily incomplete; every branch tolerates a miss.

use std::sync::{Arc, OnceLock, atomic::AtomicBool, atomic::Ordering};

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use concord_core::{
    Bitwise, Cache, Channel, EntityResult, Guild, Id, Member, Message, Transport, User,
    materialize,
};

use crate::types::InteractionType;

// =============================================================================
// RawInteraction
// =============================================================================

/// The interaction payload as received from the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInteraction {
    /// Interaction id.
    pub id: Id,
    /// Id of the application the interaction targets.
    pub application_id: Id,
    /// Interaction type discriminator.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Continuation token for responding.
    pub token: String,
    /// Interaction protocol version.
    #[serde(default)]
    pub version: u8,
    /// Guild the interaction was sent from; absent in DM context.
    #[serde(default)]
    pub guild_id: Option<Id>,
    /// Channel the interaction was sent from.
    #[serde(default)]
    pub channel_id: Option<Id>,
    /// Embedded member attribute bag, present in guild context.
    #[serde(default)]
    pub member: Option<Value>,
    /// Embedded user attribute bag, present in DM context.
    #[serde(default)]
    pub user: Option<Value>,
    /// Embedded source message, present for component interactions.
    #[serde(default)]
    pub message: Option<Value>,
    /// Embedded command/component data.
    #[serde(default)]
    pub data: Option<Value>,
    /// Invoking user's selected language.
    #[serde(default)]
    pub locale: Option<String>,
    /// Guild's preferred locale, in guild context.
    #[serde(default)]
    pub guild_locale: Option<String>,
    /// Permissions the application holds in the source channel.
    #[serde(default)]
    pub app_permissions: Option<Bitwise>,
}

// =============================================================================
// InteractionData
// =============================================================================

/// Typed view of the interaction's `data` payload.
///
/// Carries the interaction's `guild_id` so nested command data knows its
/// guild context even though the wire payload omits it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InteractionData {
    /// Invoked command id, for command interactions.
    #[serde(default)]
    pub id: Option<Id>,
    /// Invoked command name.
    #[serde(default)]
    pub name: Option<String>,
    /// Command type discriminator.
    #[serde(rename = "type", default)]
    pub kind: Option<u8>,
    /// Developer-defined component id, for component interactions.
    #[serde(default)]
    pub custom_id: Option<String>,
    /// Component type discriminator.
    #[serde(default)]
    pub component_type: Option<u8>,
    /// Selected values, for select-menu components.
    #[serde(default)]
    pub values: Vec<String>,
    /// Command options, passed through untyped.
    #[serde(default)]
    pub options: Vec<Value>,
    /// Guild context, injected from the owning interaction.
    #[serde(default)]
    pub guild_id: Option<Id>,
    /// Target id, for context-menu commands.
    #[serde(default)]
    pub target_id: Option<Id>,
}

// =============================================================================
// Interaction
// =============================================================================

/// An inbound interaction with lazy entity resolution and the one-shot
/// response state machine (see the response operations in this crate).
pub struct Interaction {
    raw: RawInteraction,
    cache: Arc<Cache>,
    transport: Arc<dyn Transport>,

    /// One-way response flag. Set by compare-and-exchange before the
    /// primary-response request is dispatched and never cleared, even when
    /// the dispatch later fails; whether the platform actually registered
    /// the response cannot be determined at this layer.
    pub(crate) responded: AtomicBool,

    data: OnceLock<Option<InteractionData>>,
    guild: OnceLock<Option<Arc<Guild>>>,
    channel: OnceLock<Option<Arc<Channel>>>,
    member: OnceLock<Option<Arc<Member>>>,
    user: OnceLock<Option<User>>,
    message: OnceLock<Option<Message>>,
}

impl Interaction {
    /// Builds an interaction from a raw gateway payload.
    pub fn from_value(
        payload: Value,
        cache: Arc<Cache>,
        transport: Arc<dyn Transport>,
    ) -> EntityResult<Self> {
        let raw: RawInteraction = materialize("interaction", payload)?;
        Ok(Self::from_raw(raw, cache, transport))
    }

    /// Builds an interaction from an already parsed payload.
    pub fn from_raw(raw: RawInteraction, cache: Arc<Cache>, transport: Arc<dyn Transport>) -> Self {
        Self {
            raw,
            cache,
            transport,
            responded: AtomicBool::new(false),
            data: OnceLock::new(),
            guild: OnceLock::new(),
            channel: OnceLock::new(),
            member: OnceLock::new(),
            user: OnceLock::new(),
            message: OnceLock::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Identity accessors
    // -------------------------------------------------------------------------

    /// Interaction id.
    pub fn id(&self) -> &Id {
        &self.raw.id
    }

    /// Application id.
    pub fn application_id(&self) -> &Id {
        &self.raw.application_id
    }

    /// Interaction type.
    pub fn kind(&self) -> InteractionType {
        self.raw.kind
    }

    /// Continuation token.
    pub fn token(&self) -> &str {
        &self.raw.token
    }

    /// Interaction protocol version.
    pub fn version(&self) -> u8 {
        self.raw.version
    }

    /// Guild id, absent in DM context.
    pub fn guild_id(&self) -> Option<&Id> {
        self.raw.guild_id.as_ref()
    }

    /// Channel id.
    pub fn channel_id(&self) -> Option<&Id> {
        self.raw.channel_id.as_ref()
    }

    /// Invoking user's selected language.
    pub fn locale(&self) -> Option<&str> {
        self.raw.locale.as_deref()
    }

    /// Guild's preferred locale.
    pub fn guild_locale(&self) -> Option<&str> {
        self.raw.guild_locale.as_deref()
    }

    /// Permissions the application holds in the source channel.
    pub fn app_permissions(&self) -> Option<Bitwise> {
        self.raw.app_permissions
    }

    /// Whether a primary response has been sent (or at least dispatched).
    pub fn responded(&self) -> bool {
        self.responded.load(Ordering::SeqCst)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    // -------------------------------------------------------------------------
    // Lazy resolvers
    // -------------------------------------------------------------------------

    /// The typed interaction data, with guild context injected.
    pub fn data(&self) -> Option<&InteractionData> {
        self.data
            .get_or_init(|| {
                let mut bag = self.raw.data.clone()?;
                if let (Some(guild_id), Some(obj)) = (&self.raw.guild_id, bag.as_object_mut()) {
                    obj.insert("guild_id".into(), Value::String(guild_id.to_string()));
                }
                resolve_bag("interaction data", bag)
            })
            .as_ref()
    }

    /// The guild the interaction was invoked from. `None` when invoked via
    /// DM or when the guild is not cached.
    pub fn guild(&self) -> Option<Arc<Guild>> {
        self.guild
            .get_or_init(|| self.cache.guilds.get(self.raw.guild_id.as_ref()?))
            .clone()
    }

    /// The channel the interaction was invoked from.
    ///
    /// Prefers the cached guild channel (preserving object identity with
    /// other references), then the cache's direct channel lookup, which
    /// covers DM channels and uncached guilds.
    pub fn channel(&self) -> Option<Arc<Channel>> {
        self.channel
            .get_or_init(|| {
                let channel_id = self.raw.channel_id.as_ref()?;
                if let Some(guild) = self.guild()
                    && let Some(channel) = guild.channels.get(channel_id)
                {
                    return Some(channel);
                }
                self.cache.channel(channel_id)
            })
            .clone()
    }

    /// The member who invoked the interaction. `None` when invoked via DM.
    ///
    /// A cached member whose user id matches the embedded payload wins over
    /// a fresh construction; otherwise the embedded bag is materialized
    /// detached with the interaction's `guild_id` merged in.
    pub fn member(&self) -> Option<Arc<Member>> {
        self.member
            .get_or_init(|| {
                let bag = self.raw.member.as_ref()?;

                if let Some(guild) = self.guild()
                    && let Some(user_id) = bag
                        .get("user")
                        .and_then(|u| u.get("id"))
                        .and_then(Value::as_str)
                    && let Some(member) = guild.members.get(&Id::from(user_id))
                {
                    return Some(member);
                }

                let mut bag = bag.clone();
                if let (Some(guild_id), Some(obj)) = (&self.raw.guild_id, bag.as_object_mut()) {
                    obj.entry("guild_id")
                        .or_insert_with(|| Value::String(guild_id.to_string()));
                }
                resolve_bag::<Member>("member", bag).map(Arc::new)
            })
            .clone()
    }

    /// The user who invoked the interaction.
    ///
    /// When a member resolves, this is the member's user (single source of
    /// truth); otherwise the embedded user bag, if any.
    pub fn user(&self) -> Option<&User> {
        self.user
            .get_or_init(|| {
                if let Some(member) = self.member() {
                    return Some(member.user.clone());
                }
                let bag = self.raw.user.clone()?;
                resolve_bag("user", bag)
            })
            .as_ref()
    }

    /// The message the interaction was triggered from, for component
    /// interactions. Always materialized detached, never cache-checked.
    pub fn message(&self) -> Option<&Message> {
        self.message
            .get_or_init(|| {
                let bag = self.raw.message.clone()?;
                resolve_bag("message", bag)
            })
            .as_ref()
    }
}

/// Materializes an embedded attribute bag, downgrading failures to a miss.
///
/// A malformed embedded payload is a peer defect the resolver cannot act
/// on; it is logged and the field resolves to `None`.
fn resolve_bag<T: serde::de::DeserializeOwned>(kind: &'static str, bag: Value) -> Option<T> {
    match materialize(kind, bag) {
        Ok(entity) => Some(entity),
        Err(e) => {
            warn!(kind = kind, error = %e, "failed to materialize embedded payload");
            None
        }
    }
}
