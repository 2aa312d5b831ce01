//! Health pool component.
//!
//! The [`HealthPool`] holds an entity's starting and current health and the
//! alive/dead latch. All mutation goes through [`HealthPool::apply_damage`]
//! and [`HealthPool::reset_to_starting`]; the pool itself never touches the
//! world. The observers in [`crate::systems::health`] turn a [`DamageOutcome`]
//! into death notifications, kill counting and despawn requests.
//!
//! # Example
//!
//! ```
//! use healthpool::components::health::{DamageOutcome, HealthPool};
//!
//! let mut pool = HealthPool::new(100);
//! assert_eq!(pool.apply_damage(30), DamageOutcome::Survived { current: 70 });
//! assert_eq!(pool.apply_damage(80), DamageOutcome::Died { current: -10 });
//! assert_eq!(pool.apply_damage(5), DamageOutcome::AlreadyDead);
//! ```
//!
//! # Related
//!
//! - [`crate::components::healthbar::HealthBar`] – the display collaborator
//! - [`crate::systems::health::initialize_health_pools`] – activation hook

use bevy_ecs::prelude::{Component, Entity};

use crate::components::healthbar::HealthDisplay;

/// How a pool reacts to out-of-range input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamagePolicy {
    /// Floor `current` at zero instead of letting it go negative.
    pub clamp_at_zero: bool,
    /// Accept negative damage as healing. Healing has no upper bound.
    pub allow_healing: bool,
}

impl Default for DamagePolicy {
    fn default() -> Self {
        DamagePolicy {
            clamp_at_zero: false,
            allow_healing: true,
        }
    }
}

/// Result of a single [`HealthPool::apply_damage`] or
/// [`HealthPool::reset_to_starting`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health changed and is still above zero.
    Survived { current: i32 },
    /// Health reached zero or below on this call. Returned once per pool.
    Died { current: i32 },
    /// The pool was already dead; nothing changed.
    AlreadyDead,
    /// Negative damage while the policy forbids healing; nothing changed.
    HealingRejected,
}

impl DamageOutcome {
    /// Current health after the call, if the call changed it.
    pub fn current(&self) -> Option<i32> {
        match self {
            DamageOutcome::Survived { current } | DamageOutcome::Died { current } => {
                Some(*current)
            }
            DamageOutcome::AlreadyDead | DamageOutcome::HealingRejected => None,
        }
    }

    pub fn is_death(&self) -> bool {
        matches!(self, DamageOutcome::Died { .. })
    }
}

/// An entity's health.
///
/// `display` points at the entity carrying the
/// [`HealthBar`](crate::components::healthbar::HealthBar) for this pool. The
/// pool does not own it: the bar may live on another entity, on the same
/// entity, or be gone already.
#[derive(Component, Debug, Clone)]
pub struct HealthPool {
    starting: i32,
    current: i32,
    dead: bool,
    pub policy: DamagePolicy,
    pub display: Option<Entity>,
}

impl HealthPool {
    /// Create a pool at full health with the default policy and no display.
    pub fn new(starting: i32) -> Self {
        HealthPool {
            starting,
            current: starting,
            dead: false,
            policy: DamagePolicy::default(),
            display: None,
        }
    }

    pub fn with_display(mut self, display: Entity) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_policy(mut self, policy: DamagePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn starting(&self) -> i32 {
        self.starting
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Sync the display to this pool and refill it.
    ///
    /// Sets the display maximum to `starting`, resets `current`, then pushes
    /// `current` to the display. Returns the outcome of the reset.
    pub fn initialize<D: HealthDisplay + ?Sized>(&mut self, display: &mut D) -> DamageOutcome {
        display.set_max_health(self.starting);
        let outcome = self.reset_to_starting();
        display.set_health(self.current);
        outcome
    }

    /// Set `current` back to `starting`.
    ///
    /// Leaves the display alone and does not revive a dead pool. A pool whose
    /// `starting` is zero or below dies here.
    pub fn reset_to_starting(&mut self) -> DamageOutcome {
        self.current = self.starting;
        self.settle()
    }

    /// Subtract `amount` from `current` and report what happened.
    ///
    /// Negative amounts heal when the policy allows it.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::AlreadyDead;
        }
        if amount < 0 && !self.policy.allow_healing {
            return DamageOutcome::HealingRejected;
        }

        self.current = self.current.saturating_sub(amount);
        if self.policy.clamp_at_zero {
            self.current = self.current.max(0);
        }

        self.settle()
    }

    /// Latch death once `current` is at or below zero.
    fn settle(&mut self) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::AlreadyDead;
        }
        if self.current <= 0 {
            self.dead = true;
            DamageOutcome::Died {
                current: self.current,
            }
        } else {
            DamageOutcome::Survived {
                current: self.current,
            }
        }
    }
}
