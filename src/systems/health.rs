//! Health systems and observers.
//!
//! - [`initialize_health_pools`] – activation hook for newly added pools
//! - [`observe_damage`] – applies [`DamageEvent`]s and runs the death path
//! - [`observe_reset_health`] – applies [`ResetHealthEvent`]s
//! - [`observe_sync_health_bar`] – applies [`SyncHealthBarEvent`]s
//! - [`render_health_bars`] – logs the textual rendition of changed bars
//!
//! # Death Flow
//!
//! A pool dies when damage, activation or a reset leaves it at zero or
//! below. [`DeathPath::kill`] then queues, in order:
//!
//! 1. [`Died`] triggered on the entity (entity observers are the listeners)
//! 2. Each hook named in the entity's [`DeathHooks`], run with the entity
//! 3. The kill counted in [`GameStats`], and the group kill if tagged
//!
//! and writes a [`DespawnRequest`], carried out by
//! [`process_despawn_requests`](crate::systems::despawn::process_despawn_requests)
//! after the queued commands have been applied.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, info, warn};

use crate::components::deathhooks::DeathHooks;
use crate::components::group::Group;
use crate::components::health::{DamageOutcome, HealthPool};
use crate::components::healthbar::{HealthBar, HealthDisplay, OwnsDisplay};
use crate::events::damage::{DamageEvent, ResetHealthEvent, SyncHealthBarEvent};
use crate::events::death::Died;
use crate::events::despawn::DespawnRequest;
use crate::resources::gamestats::GameStats;
use crate::resources::healthconfig::HealthConfig;
use crate::resources::hookstore::HookStore;

/// Pool entity data the death path needs besides the pool itself.
type DeathInfo = (Option<&'static Group>, Option<&'static DeathHooks>, Has<OwnsDisplay>);

/// Everything needed to announce a death and retire the entity.
#[derive(SystemParam)]
pub struct DeathPath<'w, 's> {
    commands: Commands<'w, 's>,
    hook_store: Option<Res<'w, HookStore>>,
    despawns: MessageWriter<'w, DespawnRequest>,
}

impl DeathPath<'_, '_> {
    /// Run the death flow for `entity`.
    ///
    /// The pool's display is despawned along with the entity only when
    /// `owns_display` is set.
    pub fn kill(
        &mut self,
        entity: Entity,
        pool: &HealthPool,
        group: Option<&Group>,
        death_hooks: Option<&DeathHooks>,
        owns_display: bool,
    ) {
        info!("{:?} died ({} health)", entity, pool.current());
        self.commands.trigger(Died { entity });

        if let Some(death_hooks) = death_hooks {
            for name in death_hooks.iter() {
                match self.hook_store.as_deref().and_then(|store| store.get(name)) {
                    Some(id) => {
                        self.commands.run_system_with(*id, entity);
                    }
                    None => warn!("Death hook '{}' for {:?} is not registered", name, entity),
                }
            }
        }

        let group = group.map(Group::name);
        self.commands.queue(move |world: &mut World| {
            let Some(mut stats) = world.get_resource_mut::<GameStats>() else {
                warn!("No GameStats resource, kill of {:?} not counted", entity);
                return;
            };
            stats.update_kills();
            if let Some(group) = group {
                stats.record_group_kill(group);
            }
        });

        let display = if owns_display { pool.display } else { None };
        self.despawns
            .write(DespawnRequest::new(entity).with_display(display));
    }
}

/// Initialize every pool added since the last run.
///
/// Sets the display maximum, refills the pool and pushes the value to the
/// display. A pool whose display is missing is still refilled. A pool that
/// starts at zero or below dies here.
pub fn initialize_health_pools(
    mut pools: Query<(Entity, &mut HealthPool, DeathInfo), Added<HealthPool>>,
    mut bars: Query<&mut HealthBar>,
    mut death: DeathPath,
) {
    for (entity, mut pool, (group, death_hooks, owns_display)) in pools.iter_mut() {
        let display = pool.display;
        let outcome = match display.and_then(|d| bars.get_mut(d).ok()) {
            Some(mut bar) => pool.initialize(&mut *bar),
            None => {
                if let Some(d) = display {
                    warn!("Health display {:?} of {:?} not found", d, entity);
                }
                pool.reset_to_starting()
            }
        };
        debug!("Initialized {:?} with {} health", entity, pool.current());
        if outcome.is_death() {
            death.kill(entity, &pool, group, death_hooks, owns_display);
        }
    }
}

/// Observer that applies a [`DamageEvent`] to the target's pool.
///
/// Requests for entities without a pool are logged and dropped. Damage to a
/// dead pool is ignored, so the death path runs once per entity even when
/// several hits land before the despawn is processed.
pub fn observe_damage(
    trigger: On<DamageEvent>,
    mut pools: Query<(&mut HealthPool, DeathInfo)>,
    mut bars: Query<&mut HealthBar>,
    mut death: DeathPath,
) {
    let event = trigger.event();
    let Ok((mut pool, (group, death_hooks, owns_display))) = pools.get_mut(event.entity) else {
        warn!("DamageEvent for {:?} which has no HealthPool", event.entity);
        return;
    };

    let outcome = pool.apply_damage(event.amount);
    debug!("{:?} took {} damage: {:?}", event.entity, event.amount, outcome);

    match outcome {
        DamageOutcome::Survived { .. } => {}
        DamageOutcome::Died { .. } => {
            death.kill(event.entity, &pool, group, death_hooks, owns_display);
        }
        DamageOutcome::AlreadyDead => {
            debug!("{:?} is already dead, damage ignored", event.entity);
            return;
        }
        DamageOutcome::HealingRejected => {
            warn!(
                "Negative damage {} for {:?} rejected, healing is disabled",
                event.amount, event.entity
            );
            return;
        }
    }

    if let Some(mut bar) = pool.display.and_then(|d| bars.get_mut(d).ok()) {
        bar.set_health(pool.current());
    }
}

/// Observer that resets the target's pool to its starting health.
///
/// The display is not updated; trigger [`SyncHealthBarEvent`] for that.
pub fn observe_reset_health(
    trigger: On<ResetHealthEvent>,
    mut pools: Query<(&mut HealthPool, DeathInfo)>,
    mut death: DeathPath,
) {
    let entity = trigger.event().entity;
    let Ok((mut pool, (group, death_hooks, owns_display))) = pools.get_mut(entity) else {
        warn!("ResetHealthEvent for {:?} which has no HealthPool", entity);
        return;
    };
    let outcome = pool.reset_to_starting();
    debug!("{:?} reset to {} health", entity, pool.current());
    if outcome.is_death() {
        death.kill(entity, &pool, group, death_hooks, owns_display);
    }
}

/// Observer that pushes the target pool's maximum and current health to its display.
pub fn observe_sync_health_bar(
    trigger: On<SyncHealthBarEvent>,
    pools: Query<&HealthPool>,
    mut bars: Query<&mut HealthBar>,
) {
    let entity = trigger.event().entity;
    let Ok(pool) = pools.get(entity) else {
        warn!("SyncHealthBarEvent for {:?} which has no HealthPool", entity);
        return;
    };
    let Some(mut bar) = pool.display.and_then(|d| bars.get_mut(d).ok()) else {
        debug!("{:?} has no health display to sync", entity);
        return;
    };
    bar.set_max_health(pool.starting());
    bar.set_health(pool.current());
}

/// Log the textual rendition of every bar changed since the last run.
pub fn render_health_bars(
    bars: Query<(Entity, &HealthBar), Changed<HealthBar>>,
    config: Option<Res<HealthConfig>>,
) {
    let width = config.map(|c| c.bar_width).unwrap_or_else(|| HealthConfig::new().bar_width);
    for (entity, bar) in bars.iter() {
        debug!("{:?} {}", entity, bar.render(width));
    }
}
