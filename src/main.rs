//! Health pool encounter runner.
//!
//! Spawns a number of enemies with health pools and health bars, then hits
//! the first living enemy with each damage value in turn, ticking the world
//! after every hit. Damage values come from `--hits`, from `--random-hits`
//! rolls, or both (listed hits first).
//!
//! # Running
//!
//! ```sh
//! cargo run -- --enemies 2 --hits 30,80,-20,150
//! RUST_LOG=debug cargo run -- --random-hits 10 --seed 7 --json
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{error, info, warn};

use healthpool::components::deathhooks::DeathHooks;
use healthpool::events::death::Died;
use healthpool::game::Game;
use healthpool::resources::gamestats::GameStats;
use healthpool::resources::healthconfig::HealthConfig;

/// Run an encounter against enemies with health pools.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file. Missing files fall back to defaults.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of enemies to spawn.
    #[arg(long, default_value_t = 1)]
    enemies: usize,

    /// Group tag for the spawned enemies.
    #[arg(long, value_name = "NAME")]
    group: Option<String>,

    /// Override the configured starting health.
    #[arg(long, value_name = "HP")]
    starting_health: Option<i32>,

    /// Floor health at zero.
    #[arg(long)]
    clamp_at_zero: bool,

    /// Reject negative damage instead of healing.
    #[arg(long)]
    no_healing: bool,

    /// Comma-separated damage values. Negative values heal.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    hits: Vec<i32>,

    /// Number of random hits to roll after the listed ones.
    #[arg(long, default_value_t = 0)]
    random_hits: usize,

    /// Smallest random damage roll.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    min_damage: i32,

    /// Largest random damage roll.
    #[arg(long, default_value_t = 25, allow_negative_numbers = true)]
    max_damage: i32,

    /// Seed for the random rolls.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final summary as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Write the effective configuration back to the config file.
    #[arg(long)]
    save_config: bool,
}

fn announce_death(In(entity): In<Entity>, stats: Res<GameStats>) {
    info!("{:?} has fallen ({} kills before it)", entity, stats.kills);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.min_damage > cli.max_damage {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--min-damage must not be larger than --max-damage",
            )
            .exit();
    }

    let mut config = HealthConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }
    if let Some(starting) = cli.starting_health {
        config.starting_health = starting;
    }
    if cli.clamp_at_zero {
        config.clamp_at_zero = true;
    }
    if cli.no_healing {
        config.allow_healing = false;
    }
    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
    }

    let mut hits = cli.hits.clone();
    let mut rng = cli
        .seed
        .map(fastrand::Rng::with_seed)
        .unwrap_or_else(fastrand::Rng::new);
    hits.extend((0..cli.random_hits).map(|_| rng.i32(cli.min_damage..=cli.max_damage)));

    let group: Option<&'static str> = cli.group.map(|g| &*Box::leak(g.into_boxed_str()));

    let mut game = Game::new(config);
    game.register_death_hook("announce", announce_death);

    let enemies: Vec<Entity> = (0..cli.enemies)
        .map(|_| {
            let enemy = game.spawn_enemy(group);
            game.world_mut()
                .entity_mut(enemy)
                .insert(DeathHooks::new().with("announce"))
                .observe(|died: On<Died>| {
                    info!("Death listener: {:?} died", died.event().entity);
                });
            enemy
        })
        .collect();
    game.tick();

    for hit in hits {
        let Some(&target) = enemies.iter().find(|&&e| game.is_alive(e)) else {
            info!("No enemies left standing");
            break;
        };
        game.damage(target, hit);
        match game.bar_text(target) {
            Some(bar) => info!("Hit {:?} for {}: {}", target, hit, bar),
            None => info!("Hit {:?} for {}", target, hit),
        }
        game.tick();
    }

    let summary = game.summary(&enemies);
    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize summary: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    info!("Kills: {}", summary.stats.kills);
    for (group, kills) in &summary.stats.kills_by_group {
        info!("  {}: {}", group, kills);
    }
    for enemy in &summary.enemies {
        match enemy.health {
            Some(health) => info!("Enemy {} alive with {} health", enemy.id, health),
            None => info!("Enemy {} is gone", enemy.id),
        }
    }
}
