//! Death notification.
//!
//! [`Died`] is triggered once for an entity, at the moment its
//! [`HealthPool`](crate::components::health::HealthPool) first reaches zero
//! or below. It targets the dying entity, so listeners are entity observers:
//!
//! ```ignore
//! commands.spawn(HealthPool::new(50)).observe(|died: On<Died>| {
//!     log::info!("{:?} is gone", died.event().entity);
//! });
//! ```
//!
//! Listeners run before the entity is despawned; the despawn itself happens
//! when [`crate::systems::despawn::process_despawn_requests`] runs.

use bevy_ecs::prelude::*;

#[derive(EntityEvent, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Died {
    /// The entity whose health ran out.
    pub entity: Entity,
}
