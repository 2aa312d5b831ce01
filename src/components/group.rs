use bevy_ecs::prelude::Component;

/// Tag naming the group an entity belongs to ("goblin", "boss", ...).
///
/// Kills of tagged entities are also counted per group in
/// [`GameStats`](crate::resources::gamestats::GameStats). Names are expected
/// to be `'static`: string literals, or strings leaked for the lifetime of
/// the program.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Group(pub &'static str);

impl Group {
    pub fn name(&self) -> &'static str {
        self.0
    }
}
