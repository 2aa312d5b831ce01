//! Event and message types used by the health flow.
//!
//! Submodules:
//! - [`damage`] – requests to damage, reset, or re-sync a health pool
//! - [`death`] – entity-scoped notification fired once when a pool runs out
//! - [`despawn`] – removal requests emitted for dead entities
pub mod damage;
pub mod death;
pub mod despawn;
