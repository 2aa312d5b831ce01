//! Health systems.
//!
//! Submodules overview
//! - [`despawn`] – carry out removal requests emitted for dead entities
//! - [`health`] – pool activation, damage/reset/sync observers, bar rendering

pub mod despawn;
pub mod health;
