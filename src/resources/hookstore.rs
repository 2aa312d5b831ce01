//! Registry for death hook systems.
//!
//! Maps hook names to [`SystemId`]s of systems taking the dying entity as
//! input. [`DeathHooks`](crate::components::deathhooks::DeathHooks) refer to
//! entries here by name.

use bevy_ecs::prelude::{Entity, In, Resource};
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// A registered system run with the dying entity.
pub type DeathHookId = SystemId<In<Entity>>;

/// Map of hook names to system IDs.
#[derive(Resource, Default)]
pub struct HookStore {
    pub map: FxHashMap<String, DeathHookId>,
}

impl HookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        HookStore {
            map: FxHashMap::default(),
        }
    }

    /// Insert a system ID under a name, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, id: DeathHookId) {
        self.map.insert(name.into(), id);
    }

    /// Retrieve a system ID by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&DeathHookId> {
        self.map.get(name.as_ref())
    }
}
