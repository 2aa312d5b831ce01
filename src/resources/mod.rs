//! ECS resources made available to systems.
//!
//! Overview
//! - `gamestats` – kill counters health pools report to
//! - `healthconfig` – INI-backed settings for new pools and bar rendering
//! - `hookstore` – registry of death hook systems by name
pub mod gamestats;
pub mod healthconfig;
pub mod hookstore;
