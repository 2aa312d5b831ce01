//! Game world setup and per-tick driving.
//!
//! [`Game`] owns the ECS [`World`] and the [`Schedule`] that advances it. It
//! inserts the resources the health flow depends on, registers the
//! observers, and offers thin helpers to spawn enemies and send requests.
//!
//! # Tick Order
//!
//! 1. [`initialize_health_pools`] – activate pools spawned since last tick
//! 2. [`process_despawn_requests`] – remove entities that died
//! 3. [`update_despawn_messages`] – advance the request buffers
//! 4. [`render_health_bars`] – log changed bars
//!
//! Damage, reset and sync requests are not part of the schedule: they are
//! triggered events handled immediately by their observers.

use bevy_ecs::prelude::*;
use bevy_ecs::system::IntoSystem;
use log::info;
use serde::Serialize;

use crate::components::group::Group;
use crate::components::health::HealthPool;
use crate::components::healthbar::{HealthBar, OwnsDisplay};
use crate::events::damage::{DamageEvent, ResetHealthEvent, SyncHealthBarEvent};
use crate::events::despawn::DespawnRequest;
use crate::resources::gamestats::GameStats;
use crate::resources::healthconfig::HealthConfig;
use crate::resources::hookstore::{DeathHookId, HookStore};
use crate::systems::despawn::{process_despawn_requests, update_despawn_messages};
use crate::systems::health::{
    initialize_health_pools, observe_damage, observe_reset_health, observe_sync_health_bar,
    render_health_bars,
};

/// Health state of one entity at the end of an encounter.
#[derive(Debug, Clone, Serialize)]
pub struct EnemySummary {
    pub id: u64,
    pub group: Option<&'static str>,
    /// `None` once the entity has been despawned.
    pub health: Option<i32>,
    pub alive: bool,
}

/// Kill counts and per-entity health, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterSummary {
    pub stats: GameStats,
    pub enemies: Vec<EnemySummary>,
}

pub struct Game {
    world: World,
    schedule: Schedule,
}

impl Game {
    /// Build a world with the health resources, observers and schedule.
    pub fn new(config: HealthConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(GameStats::default());
        world.insert_resource(HookStore::new());
        world.init_resource::<Messages<DespawnRequest>>();

        world.add_observer(observe_damage);
        world.add_observer(observe_reset_health);
        world.add_observer(observe_sync_health_bar);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                initialize_health_pools,
                process_despawn_requests,
                update_despawn_messages,
                render_health_bars,
            )
                .chain(),
        );

        Game { world, schedule }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &HealthConfig {
        self.world.resource::<HealthConfig>()
    }

    pub fn stats(&self) -> &GameStats {
        self.world.resource::<GameStats>()
    }

    pub fn kills(&self) -> u32 {
        self.stats().kills
    }

    /// Spawn an enemy with a configured pool and its own health bar.
    ///
    /// The bar is despawned together with the enemy. The pool is initialized
    /// on the next [`tick`](Self::tick).
    pub fn spawn_enemy(&mut self, group: Option<&'static str>) -> Entity {
        let (starting, policy) = {
            let config = self.config();
            (config.starting_health, config.policy())
        };
        let bar = self.world.spawn(HealthBar::default()).id();
        let pool = HealthPool::new(starting)
            .with_policy(policy)
            .with_display(bar);

        let mut enemy = self.world.spawn((pool, OwnsDisplay));
        if let Some(group) = group {
            enemy.insert(Group(group));
        }
        let id = enemy.id();
        info!("Spawned {:?} with {} health", id, starting);
        id
    }

    /// Register a death hook system under `name`.
    ///
    /// Entities list the hooks they want in their
    /// [`DeathHooks`](crate::components::deathhooks::DeathHooks).
    pub fn register_death_hook<M>(
        &mut self,
        name: impl Into<String>,
        system: impl IntoSystem<In<Entity>, (), M> + 'static,
    ) -> DeathHookId {
        let id = self.world.register_system(system);
        self.world.resource_mut::<HookStore>().insert(name, id);
        id
    }

    pub fn damage(&mut self, entity: Entity, amount: i32) {
        self.world.trigger(DamageEvent { entity, amount });
        self.world.flush();
    }

    pub fn reset_health(&mut self, entity: Entity) {
        self.world.trigger(ResetHealthEvent { entity });
        self.world.flush();
    }

    pub fn sync_health_bar(&mut self, entity: Entity) {
        self.world.trigger(SyncHealthBarEvent { entity });
        self.world.flush();
    }

    /// Run one pass of the schedule.
    pub fn tick(&mut self) {
        self.schedule.run(&mut self.world);
    }

    pub fn health(&self, entity: Entity) -> Option<i32> {
        self.world.get::<HealthPool>(entity).map(HealthPool::current)
    }

    /// `true` while the entity exists and its pool has not run out.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world
            .get::<HealthPool>(entity)
            .is_some_and(|pool| !pool.is_dead())
    }

    /// Textual rendition of the entity's health bar.
    pub fn bar_text(&self, entity: Entity) -> Option<String> {
        let display = self.world.get::<HealthPool>(entity)?.display?;
        let bar = self.world.get::<HealthBar>(display)?;
        Some(bar.render(self.config().bar_width))
    }

    pub fn summary(&self, enemies: &[Entity]) -> EncounterSummary {
        let enemies = enemies
            .iter()
            .map(|&entity| EnemySummary {
                id: entity.to_bits(),
                group: self.world.get::<Group>(entity).map(Group::name),
                health: self.health(entity),
                alive: self.is_alive(entity),
            })
            .collect();
        EncounterSummary {
            stats: self.stats().clone(),
            enemies,
        }
    }
}
