//! Process-wide entity cache.
//!
//! Entities observed on the wire are kept in keyed registries so later
//! lookups return the same shared instance instead of a fresh copy. The
//! registries are read-mostly: resolvers only read, event handlers
//! occasionally write back newly observed entities (last write wins).
//!
//! Registries may be arbitrarily incomplete (a guild can be cached with no
//! channels or members loaded) and callers must never assume otherwise.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::entity::{Channel, Guild};
use crate::id::Id;

// =============================================================================
// Keyed
// =============================================================================

/// An entity addressable by id inside a [`Registry`].
pub trait Keyed {
    /// The id this entity is registered under.
    fn key(&self) -> &Id;
}

// =============================================================================
// Registry
// =============================================================================

/// A keyed cache of previously observed entities.
///
/// `get` is a pure read. `push` inserts or replaces the entry for the
/// entity's key and returns the shared handle now held by the registry.
#[derive(Debug)]
pub struct Registry<T: Keyed> {
    inner: RwLock<HashMap<Id, Arc<T>>>,
}

impl<T: Keyed> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Looks up an entity by id.
    pub fn get(&self, id: &Id) -> Option<Arc<T>> {
        self.inner.read().get(id).cloned()
    }

    /// Inserts an entity, replacing any previous entry with the same key.
    pub fn push(&self, entity: T) -> Arc<T> {
        self.push_arc(Arc::new(entity))
    }

    /// Inserts an already shared entity, replacing any previous entry.
    pub fn push_arc(&self, entity: Arc<T>) -> Arc<T> {
        let key = entity.key().clone();
        trace!(id = %key, "registry write-back");
        self.inner.write().insert(key, Arc::clone(&entity));
        entity
    }

    /// Returns the number of cached entities.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

// =============================================================================
// Cache
// =============================================================================

/// The process-wide entity cache consulted by resolvers.
///
/// Guild-scoped registries live on the cached [`Guild`] itself; the flat
/// channel registry covers direct-message channels and channels whose guild
/// is not cached.
#[derive(Debug, Default)]
pub struct Cache {
    /// Guilds by id.
    pub guilds: Registry<Guild>,
    /// Non-guild-scoped channel lookup (DM channels, uncached guilds).
    pub channels: Registry<Channel>,
}

impl Cache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a channel without going through a guild.
    pub fn channel(&self, id: &Id) -> Option<Arc<Channel>> {
        self.channels.get(id)
    }
}
