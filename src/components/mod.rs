//! ECS components for entities with health.
//!
//! Submodules overview:
//! - [`deathhooks`] – named systems to run when an entity's health runs out
//! - [`group`] – tag component for grouping entities by name
//! - [`health`] – the health pool itself: damage, reset, alive/dead latch
//! - [`healthbar`] – display collaborator showing a pool's health

pub mod deathhooks;
pub mod group;
pub mod health;
pub mod healthbar;
