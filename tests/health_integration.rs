//! Health flow integration tests: activation, damage, death, despawn.

use bevy_ecs::prelude::*;

use healthpool::components::deathhooks::DeathHooks;
use healthpool::components::group::Group;
use healthpool::components::health::{DamagePolicy, HealthPool};
use healthpool::components::healthbar::{HealthBar, OwnsDisplay};
use healthpool::events::damage::{DamageEvent, ResetHealthEvent, SyncHealthBarEvent};
use healthpool::events::death::Died;
use healthpool::events::despawn::DespawnRequest;
use healthpool::game::Game;
use healthpool::resources::gamestats::GameStats;
use healthpool::resources::healthconfig::HealthConfig;
use healthpool::resources::hookstore::HookStore;
use healthpool::systems::despawn::{process_despawn_requests, update_despawn_messages};
use healthpool::systems::health::{
    initialize_health_pools, observe_damage, observe_reset_health, observe_sync_health_bar,
};

#[derive(Resource, Default)]
struct DeathCount(u32);

#[derive(Resource, Default)]
struct HookLog(Vec<(&'static str, Entity)>);

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(GameStats::default());
    world.insert_resource(HookStore::new());
    world.init_resource::<Messages<DespawnRequest>>();
    world.init_resource::<DeathCount>();
    world.init_resource::<HookLog>();
    world.add_observer(observe_damage);
    world.add_observer(observe_reset_health);
    world.add_observer(observe_sync_health_bar);
    world
}

fn tick_init(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(initialize_health_pools);
    schedule.run(world);
}

fn tick_despawn(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((process_despawn_requests, update_despawn_messages).chain());
    schedule.run(world);
}

fn damage(world: &mut World, entity: Entity, amount: i32) {
    world.trigger(DamageEvent { entity, amount });
    world.flush();
}

/// Spawn a pool with its own bar and a counting death listener.
fn spawn_with_bar(world: &mut World, starting: i32) -> (Entity, Entity) {
    let bar = world.spawn(HealthBar::default()).id();
    let entity = world
        .spawn((HealthPool::new(starting).with_display(bar), OwnsDisplay))
        .observe(|_died: On<Died>, mut count: ResMut<DeathCount>| {
            count.0 += 1;
        })
        .id();
    (entity, bar)
}

fn bar_of(world: &World, bar: Entity) -> HealthBar {
    *world.get::<HealthBar>(bar).unwrap()
}

#[test]
fn activation_fills_pool_and_bar() {
    let mut world = make_world();
    let (entity, bar) = spawn_with_bar(&mut world, 100);

    tick_init(&mut world);

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 100);
    let bar = bar_of(&world, bar);
    assert_eq!(bar.max(), 100);
    assert_eq!(bar.current(), 100);
}

#[test]
fn activation_runs_once_per_pool() {
    let mut world = make_world();
    let (entity, bar) = spawn_with_bar(&mut world, 100);
    let mut schedule = Schedule::default();
    schedule.add_systems(initialize_health_pools);
    schedule.run(&mut world);

    damage(&mut world, entity, 40);
    schedule.run(&mut world);

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 60);
    assert_eq!(bar_of(&world, bar).current(), 60);
}

#[test]
fn activation_without_display_still_resets() {
    let mut world = make_world();
    let missing = world.spawn_empty().id();
    world.despawn(missing);
    let entity = world.spawn(HealthPool::new(30).with_display(missing)).id();

    tick_init(&mut world);

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 30);
}

#[test]
fn non_lethal_damage_updates_pool_and_bar_only() {
    let mut world = make_world();
    let (entity, bar) = spawn_with_bar(&mut world, 100);
    tick_init(&mut world);

    damage(&mut world, entity, 25);
    tick_despawn(&mut world);

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 75);
    assert_eq!(bar_of(&world, bar).current(), 75);
    assert_eq!(world.resource::<DeathCount>().0, 0);
    assert_eq!(world.resource::<GameStats>().kills, 0);
    assert!(world.get_entity(entity).is_ok());
}

#[test]
fn scenario_thirty_then_eighty_kills_once() {
    let mut world = make_world();
    let (entity, bar) = spawn_with_bar(&mut world, 100);
    tick_init(&mut world);

    damage(&mut world, entity, 30);
    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 70);
    assert_eq!(world.resource::<DeathCount>().0, 0);

    damage(&mut world, entity, 80);
    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), -10);
    assert_eq!(bar_of(&world, bar).current(), -10);
    assert_eq!(world.resource::<DeathCount>().0, 1);
    assert_eq!(world.resource::<GameStats>().kills, 1);
    assert_eq!(world.resource::<Messages<DespawnRequest>>().len(), 1);

    tick_despawn(&mut world);

    assert!(world.get_entity(entity).is_err());
    assert!(world.get_entity(bar).is_err());
}

#[test]
fn hits_after_death_are_ignored() {
    let mut world = make_world();
    let (entity, _bar) = spawn_with_bar(&mut world, 10);
    tick_init(&mut world);

    damage(&mut world, entity, 50);
    damage(&mut world, entity, 50);
    damage(&mut world, entity, -500);

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), -40);
    assert_eq!(world.resource::<DeathCount>().0, 1);
    assert_eq!(world.resource::<GameStats>().kills, 1);
    assert_eq!(world.resource::<Messages<DespawnRequest>>().len(), 1);

    tick_despawn(&mut world);
    damage(&mut world, entity, 5);
    assert_eq!(world.resource::<GameStats>().kills, 1);
}

#[test]
fn negative_damage_heals() {
    let mut world = make_world();
    let (entity, bar) = spawn_with_bar(&mut world, 100);
    tick_init(&mut world);

    damage(&mut world, entity, -20);

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 120);
    assert_eq!(bar_of(&world, bar).current(), 120);
    assert_eq!(bar_of(&world, bar).max(), 100);
}

#[test]
fn healing_disabled_leaves_pool_and_bar() {
    let mut world = make_world();
    let bar = world.spawn(HealthBar::default()).id();
    let entity = world
        .spawn(
            HealthPool::new(100)
                .with_display(bar)
                .with_policy(DamagePolicy {
                    clamp_at_zero: false,
                    allow_healing: false,
                }),
        )
        .id();
    tick_init(&mut world);

    damage(&mut world, entity, 10);
    damage(&mut world, entity, -20);

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 90);
    assert_eq!(bar_of(&world, bar).current(), 90);
}

#[test]
fn reset_restores_pool_but_not_bar_until_synced() {
    let mut world = make_world();
    let (entity, bar) = spawn_with_bar(&mut world, 100);
    tick_init(&mut world);
    damage(&mut world, entity, 60);

    world.trigger(ResetHealthEvent { entity });
    world.flush();

    assert_eq!(world.get::<HealthPool>(entity).unwrap().current(), 100);
    assert_eq!(bar_of(&world, bar).current(), 40);

    world.trigger(SyncHealthBarEvent { entity });
    world.flush();

    assert_eq!(bar_of(&world, bar).current(), 100);
    assert_eq!(bar_of(&world, bar).max(), 100);
}

#[test]
fn unowned_display_outlives_pool() {
    let mut world = make_world();
    let bar = world.spawn(HealthBar::default()).id();
    let entity = world.spawn(HealthPool::new(5).with_display(bar)).id();
    tick_init(&mut world);

    damage(&mut world, entity, 5);
    tick_despawn(&mut world);

    assert!(world.get_entity(entity).is_err());
    assert!(world.get_entity(bar).is_ok());
    assert_eq!(bar_of(&world, bar).current(), 0);
}

#[test]
fn damage_without_pool_is_dropped() {
    let mut world = make_world();
    let entity = world.spawn(Group("rock")).id();

    damage(&mut world, entity, 1000);
    tick_despawn(&mut world);

    assert!(world.get_entity(entity).is_ok());
    assert_eq!(world.resource::<GameStats>().kills, 0);
}

#[test]
fn death_hooks_run_in_order_with_entity() {
    fn first(In(entity): In<Entity>, mut log: ResMut<HookLog>) {
        log.0.push(("first", entity));
    }
    fn second(In(entity): In<Entity>, mut log: ResMut<HookLog>) {
        log.0.push(("second", entity));
    }

    let mut world = make_world();
    let first_id = world.register_system(first);
    let second_id = world.register_system(second);
    {
        let mut store = world.resource_mut::<HookStore>();
        store.insert("first", first_id);
        store.insert("second", second_id);
    }

    let entity = world
        .spawn((
            HealthPool::new(10),
            DeathHooks::new().with("first").with("missing").with("second"),
        ))
        .id();
    tick_init(&mut world);

    damage(&mut world, entity, 3);
    assert!(world.resource::<HookLog>().0.is_empty());

    damage(&mut world, entity, 7);
    assert_eq!(
        world.resource::<HookLog>().0,
        vec![("first", entity), ("second", entity)]
    );
}

#[test]
fn group_kills_are_counted() {
    let mut world = make_world();
    let goblins: Vec<Entity> = (0..3)
        .map(|_| world.spawn((HealthPool::new(1), Group("goblin"))).id())
        .collect();
    let boss = world.spawn((HealthPool::new(1), Group("boss"))).id();
    tick_init(&mut world);

    for goblin in goblins {
        damage(&mut world, goblin, 1);
    }
    damage(&mut world, boss, 1);

    let stats = world.resource::<GameStats>();
    assert_eq!(stats.kills, 4);
    assert_eq!(stats.group_kills("goblin"), 3);
    assert_eq!(stats.group_kills("boss"), 1);
}

#[test]
fn game_runs_full_encounter() {
    let mut config = HealthConfig::new();
    config.bar_width = 10;
    let mut game = Game::new(config);

    let hooked = std::sync::Arc::new(std::sync::atomic::AtomicU32::new(0));
    let counter = hooked.clone();
    game.register_death_hook("count", move |In(_entity): In<Entity>| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    let enemy = game.spawn_enemy(Some("slime"));
    game.world_mut()
        .entity_mut(enemy)
        .insert(DeathHooks::new().with("count"));
    game.tick();
    assert_eq!(game.bar_text(enemy).as_deref(), Some("[##########] 100/100"));

    game.damage(enemy, 30);
    game.tick();
    assert_eq!(game.health(enemy), Some(70));
    assert_eq!(game.bar_text(enemy).as_deref(), Some("[#######---] 70/100"));

    game.damage(enemy, 80);
    assert!(!game.is_alive(enemy));
    assert_eq!(game.health(enemy), Some(-10));
    game.tick();

    assert_eq!(game.health(enemy), None);
    assert_eq!(game.kills(), 1);
    assert_eq!(game.stats().group_kills("slime"), 1);
    assert_eq!(hooked.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn game_reset_and_sync() {
    let mut game = Game::new(HealthConfig::new());
    let enemy = game.spawn_enemy(None);
    game.tick();

    game.damage(enemy, 50);
    game.reset_health(enemy);
    assert_eq!(game.health(enemy), Some(100));
    assert!(game.bar_text(enemy).unwrap().ends_with(" 50/100"));

    game.sync_health_bar(enemy);
    assert!(game.bar_text(enemy).unwrap().ends_with(" 100/100"));
}

#[test]
fn game_pool_starting_at_zero_dies_on_activation() {
    let mut config = HealthConfig::new();
    config.starting_health = 0;
    let mut game = Game::new(config);
    game.world_mut().init_resource::<DeathCount>();

    let enemy = game.spawn_enemy(Some("husk"));
    let bar = game.world().get::<HealthPool>(enemy).unwrap().display.unwrap();
    game.world_mut()
        .entity_mut(enemy)
        .observe(|_died: On<Died>, mut count: ResMut<DeathCount>| {
            count.0 += 1;
        });

    game.tick();

    assert_eq!(game.world().resource::<DeathCount>().0, 1);
    assert_eq!(game.kills(), 1);
    assert_eq!(game.stats().group_kills("husk"), 1);
    assert_eq!(game.health(enemy), None);
    assert!(game.world().get_entity(bar).is_err());

    game.tick();
    assert_eq!(game.world().resource::<DeathCount>().0, 1);
    assert_eq!(game.kills(), 1);
}

#[test]
fn reset_to_non_positive_starting_dies_once() {
    let mut world = make_world();
    let (entity, bar) = spawn_with_bar(&mut world, -5);

    world.trigger(ResetHealthEvent { entity });
    world.flush();

    assert_eq!(world.resource::<DeathCount>().0, 1);
    assert_eq!(world.resource::<GameStats>().kills, 1);
    assert_eq!(world.resource::<Messages<DespawnRequest>>().len(), 1);

    tick_init(&mut world);
    world.trigger(ResetHealthEvent { entity });
    world.flush();

    assert_eq!(world.resource::<DeathCount>().0, 1);
    assert_eq!(world.resource::<GameStats>().kills, 1);
    assert_eq!(bar_of(&world, bar).current(), -5);

    tick_despawn(&mut world);
    assert!(world.get_entity(entity).is_err());
    assert!(world.get_entity(bar).is_err());
}

#[test]
fn kill_is_counted_after_listeners_and_hooks() {
    #[derive(Resource, Default)]
    struct SeenKills(Vec<u32>);

    fn record(In(_entity): In<Entity>, stats: Res<GameStats>, mut seen: ResMut<SeenKills>) {
        seen.0.push(stats.kills);
    }

    let mut world = make_world();
    world.init_resource::<SeenKills>();
    let id = world.register_system(record);
    world.resource_mut::<HookStore>().insert("record", id);

    let first = world
        .spawn((HealthPool::new(1), DeathHooks::new().with("record")))
        .observe(|_died: On<Died>, stats: Res<GameStats>, mut seen: ResMut<SeenKills>| {
            seen.0.push(stats.kills);
        })
        .id();
    let second = world
        .spawn((HealthPool::new(1), DeathHooks::new().with("record")))
        .id();
    tick_init(&mut world);

    damage(&mut world, first, 1);
    damage(&mut world, second, 1);

    assert_eq!(world.resource::<SeenKills>().0, vec![0, 0, 1]);
    assert_eq!(world.resource::<GameStats>().kills, 2);
}
