//! Health configuration resource.
//!
//! Manages health settings loaded from an INI configuration file. Provides
//! defaults so a missing or partial file still yields a usable setup.
//!
//! # Configuration File Format
//!
//! ```ini
//! [health]
//! starting = 100
//! clamp_at_zero = false
//! allow_healing = true
//!
//! [display]
//! bar_width = 20
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::health::DamagePolicy;

/// Default safe values for startup
const DEFAULT_STARTING_HEALTH: i32 = 100;
const DEFAULT_CLAMP_AT_ZERO: bool = false;
const DEFAULT_ALLOW_HEALING: bool = true;
const DEFAULT_BAR_WIDTH: usize = 20;
/// Widest bar a config file may ask for.
pub const MAX_BAR_WIDTH: usize = 200;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Health configuration resource.
///
/// Read by [`Game::spawn_enemy`](crate::game::Game::spawn_enemy) when
/// building new pools and by the bar rendering system.
#[derive(Resource, Debug, Clone)]
pub struct HealthConfig {
    /// Health a new pool starts with.
    pub starting_health: i32,
    /// Floor health at zero instead of going negative.
    pub clamp_at_zero: bool,
    /// Treat negative damage as healing.
    pub allow_healing: bool,
    /// Cells in the textual health bar.
    pub bar_width: usize,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            starting_health: DEFAULT_STARTING_HEALTH,
            clamp_at_zero: DEFAULT_CLAMP_AT_ZERO,
            allow_healing: DEFAULT_ALLOW_HEALING,
            bar_width: DEFAULT_BAR_WIDTH,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// The damage policy new pools are created with.
    pub fn policy(&self) -> DamagePolicy {
        DamagePolicy {
            clamp_at_zero: self.clamp_at_zero,
            allow_healing: self.allow_healing,
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config from {:?}: starting={}, clamp_at_zero={}, allow_healing={}, bar_width={}",
            self.config_path,
            self.starting_health,
            self.clamp_at_zero,
            self.allow_healing,
            self.bar_width
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, contents: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(contents.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [health] section
        if let Some(starting) = config.getint("health", "starting").ok().flatten() {
            self.starting_health = starting.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        }
        if let Some(clamp) = config.getbool("health", "clamp_at_zero").ok().flatten() {
            self.clamp_at_zero = clamp;
        }
        if let Some(heal) = config.getbool("health", "allow_healing").ok().flatten() {
            self.allow_healing = heal;
        }

        // [display] section
        if let Some(width) = config.getuint("display", "bar_width").ok().flatten() {
            self.bar_width =
                usize::try_from(width).map_or(MAX_BAR_WIDTH, |w| w.min(MAX_BAR_WIDTH));
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [health] section
        config.set("health", "starting", Some(self.starting_health.to_string()));
        config.set("health", "clamp_at_zero", Some(self.clamp_at_zero.to_string()));
        config.set("health", "allow_healing", Some(self.allow_healing.to_string()));

        // [display] section
        config.set("display", "bar_width", Some(self.bar_width.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
