//! Named death hooks.
//!
//! [`DeathHooks`] lists systems, by name, that run with the dying entity as
//! input when its pool first reaches zero. Names resolve through
//! [`HookStore`](crate::resources::hookstore::HookStore), so a hook can be
//! registered once and attached to any number of entities.
//!
//! For a one-off listener, observe [`Died`](crate::events::death::Died) on the
//! entity instead.
//!
//! ```ignore
//! let drop_loot = world.register_system(drop_loot_system);
//! world.resource_mut::<HookStore>().insert("drop_loot", drop_loot);
//!
//! world.spawn((HealthPool::new(30), DeathHooks::new().with("drop_loot")));
//! ```

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

/// Ordered hook names run on death.
#[derive(Component, Debug, Clone, Default)]
pub struct DeathHooks {
    pub names: SmallVec<[String; 2]>,
}

impl DeathHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.push(name);
        self
    }

    /// Append a hook. A name already present is not added twice.
    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
