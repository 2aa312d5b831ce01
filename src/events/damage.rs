//! Health request events.
//!
//! These are the ways game code asks a
//! [`HealthPool`](crate::components::health::HealthPool) to change. They are
//! triggered globally (`world.trigger(..)` or `commands.trigger(..)`) and
//! handled by the observers in [`crate::systems::health`].
//!
//! # Example
//!
//! ```ignore
//! commands.trigger(DamageEvent { entity: goblin, amount: 30 });
//! commands.trigger(ResetHealthEvent { entity: goblin });
//! // reset does not touch the bar; refresh it explicitly
//! commands.trigger(SyncHealthBarEvent { entity: goblin });
//! ```

use bevy_ecs::prelude::*;

/// Subtract `amount` from the entity's health. Negative amounts heal.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    /// The entity carrying the pool.
    pub entity: Entity,
    pub amount: i32,
}

/// Set the entity's health back to its starting value.
///
/// The display is left as it is.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetHealthEvent {
    pub entity: Entity,
}

/// Push the entity's maximum and current health to its display.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncHealthBarEvent {
    pub entity: Entity,
}
