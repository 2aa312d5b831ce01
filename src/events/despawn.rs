//! Entity removal requests.
//!
//! A health pool never despawns its own entity. When it dies the damage
//! observer writes a [`DespawnRequest`] and
//! [`process_despawn_requests`](crate::systems::despawn::process_despawn_requests)
//! carries it out on the next tick. Hosts with their own lifecycle handling
//! can read the messages instead.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// Request to remove an entity from the world.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DespawnRequest {
    pub entity: Entity,
    /// Also remove this display entity, if set.
    pub display: Option<Entity>,
}

impl DespawnRequest {
    pub fn new(entity: Entity) -> Self {
        DespawnRequest {
            entity,
            display: None,
        }
    }

    pub fn with_display(mut self, display: Option<Entity>) -> Self {
        self.display = display;
        self
    }
}
