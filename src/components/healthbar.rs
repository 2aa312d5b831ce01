//! Health bar display component.
//!
//! A [`HealthBar`] is the display collaborator of a
//! [`HealthPool`](crate::components::health::HealthPool). It only stores what
//! it was told through the [`HealthDisplay`] contract; drawing is left to the
//! host. [`HealthBar::render`] produces a textual rendition used for logging.
//!
//! ```
//! use healthpool::components::healthbar::{HealthBar, HealthDisplay};
//!
//! let mut bar = HealthBar::default();
//! bar.set_max_health(100);
//! bar.set_health(50);
//! assert_eq!(bar.render(10), "[#####-----] 50/100");
//! ```

use bevy_ecs::prelude::Component;

/// Contract between a health pool and whatever shows its value.
pub trait HealthDisplay {
    fn set_max_health(&mut self, max: i32);
    fn set_health(&mut self, current: i32);
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthBar {
    max: i32,
    current: i32,
}

impl HealthBar {
    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    /// Filled fraction of the bar in `[0, 1]`.
    ///
    /// Returns 0 for a bar with no positive maximum.
    pub fn fill_ratio(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }

    /// Render the bar as `[###---] current/max` with `width` cells.
    pub fn render(&self, width: usize) -> String {
        let filled = (self.fill_ratio() * width as f32).round() as usize;
        let filled = filled.min(width);
        format!(
            "[{}{}] {}/{}",
            "#".repeat(filled),
            "-".repeat(width - filled),
            self.current,
            self.max
        )
    }
}

/// Marks a pool entity whose display entity goes away together with it.
///
/// Without this marker the display outlives its pool and is left to the host.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct OwnsDisplay;

impl HealthDisplay for HealthBar {
    fn set_max_health(&mut self, max: i32) {
        self.max = max;
    }

    fn set_health(&mut self, current: i32) {
        self.current = current;
    }
}
