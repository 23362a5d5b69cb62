//! Gateway event handlers that feed the cache.
//!
//! Update events capture the previously cached entity before writing back,
//! so consumers see both states of the transition.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use concord_core::{Cache, EntityResult, StageInstance, materialize};

/// Both sides of a stage instance transition.
#[derive(Debug, Clone)]
pub struct StageInstanceUpdate {
    /// State after the update.
    pub current: Arc<StageInstance>,
    /// Cached state before the update, when the instance was known.
    pub old: Option<Arc<StageInstance>>,
}

/// Applies a stage instance update payload to the cache.
///
/// The old instance is read out of the owning guild's registry before the
/// new one is written; reversing the order would lose the prior state.
/// Unknown guilds still produce an update with `old` set to `None`.
pub fn stage_instance_update(
    cache: &Cache,
    payload: Value,
) -> EntityResult<StageInstanceUpdate> {
    let instance: StageInstance = materialize("stage_instance", payload)?;

    let (current, old) = match cache.guilds.get(&instance.guild_id) {
        Some(guild) => {
            let old = guild.stage_instances.get(&instance.id);
            (guild.stage_instances.push(instance), old)
        }
        None => {
            debug!(guild_id = %instance.guild_id, "stage instance update for unknown guild");
            (Arc::new(instance), None)
        }
    };

    Ok(StageInstanceUpdate { current, old })
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_core::{Guild, Id};
    use serde_json::json;

    fn payload(topic: &str) -> Value {
        json!({"id": "3", "guild_id": "10", "channel_id": "20", "topic": topic})
    }

    #[test]
    fn test_first_update_has_no_old_state() {
        let cache = Cache::new();
        cache.guilds.push(Guild {
            id: Id::from("10"),
            ..Default::default()
        });

        let update = stage_instance_update(&cache, payload("opening")).unwrap();
        assert!(update.old.is_none());
        assert_eq!(update.current.topic, "opening");
    }

    #[test]
    fn test_old_state_is_captured_before_write_back() {
        let cache = Cache::new();
        let guild = cache.guilds.push(Guild {
            id: Id::from("10"),
            ..Default::default()
        });

        let first = stage_instance_update(&cache, payload("before")).unwrap();
        let second = stage_instance_update(&cache, payload("after")).unwrap();

        let old = second.old.unwrap();
        assert!(Arc::ptr_eq(&old, &first.current));
        assert_eq!(old.topic, "before");
        assert_eq!(second.current.topic, "after");
        // The registry now holds the new state.
        assert_eq!(
            guild.stage_instances.get(&Id::from("3")).unwrap().topic,
            "after"
        );
    }

    #[test]
    fn test_unknown_guild_still_yields_current() {
        let cache = Cache::new();
        let update = stage_instance_update(&cache, payload("orphan")).unwrap();
        assert!(update.old.is_none());
        assert_eq!(update.current.guild_id, "10");
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let cache = Cache::new();
        let err = stage_instance_update(&cache, json!({"id": "3"})).unwrap_err();
        let concord_core::EntityError::Materialize { kind, .. } = err;
        assert_eq!(kind, "stage_instance");
    }
}
