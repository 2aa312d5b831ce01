//! Health pools for `bevy_ecs` worlds.
//!
//! This library exposes the components, resources, events and systems that
//! give entities a health pool, apply damage to it, announce deaths, and keep
//! a health bar in sync. [`game::Game`] wires them into a ready-to-run world.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
