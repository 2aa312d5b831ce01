//! Game-wide statistics resource.
//!
//! [`GameStats`] is the game-state collaborator health pools report kills
//! to. It lives in the ECS world as a resource, so systems and observers get
//! it injected as `ResMut<GameStats>` instead of reaching for a global.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct GameStats {
    /// Total kills since the stats were created or last cleared.
    pub kills: u32,
    /// Kills of entities tagged with a [`Group`](crate::components::group::Group).
    pub kills_by_group: FxHashMap<String, u32>,
}

impl GameStats {
    /// Count one kill.
    pub fn update_kills(&mut self) {
        self.kills = self.kills.saturating_add(1);
    }

    /// Count one kill against `group`. Does not touch the total.
    pub fn record_group_kill(&mut self, group: &str) {
        let count = self.kills_by_group.entry(group.to_string()).or_insert(0);
        *count = count.saturating_add(1);
    }

    pub fn group_kills(&self, group: &str) -> u32 {
        self.kills_by_group.get(group).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.kills = 0;
        self.kills_by_group.clear();
    }
}
