//! Despawn request processing.
//!
//! - [`process_despawn_requests`] – despawns entities named in [`DespawnRequest`]s
//! - [`update_despawn_messages`] – advances the message buffers once per tick

use bevy_ecs::prelude::*;
use log::debug;

use crate::events::despawn::DespawnRequest;

/// Despawn every entity requested since the last run.
///
/// Entities that are already gone are skipped, so duplicate requests are
/// harmless.
pub fn process_despawn_requests(
    mut reader: MessageReader<DespawnRequest>,
    mut commands: Commands,
) {
    for request in reader.read() {
        let targets = std::iter::once(request.entity).chain(request.display);
        for entity in targets {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                debug!("Despawning {:?}", entity);
                entity_commands.try_despawn();
            }
        }
    }
}

/// Advance the ECS message queue for [`DespawnRequest`].
///
/// Run after [`process_despawn_requests`] so requests written during the
/// previous tick are read before they are dropped.
pub fn update_despawn_messages(mut messages: ResMut<Messages<DespawnRequest>>) {
    messages.update();
}
