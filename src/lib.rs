//! Star Catcher: a single-screen platformer.
//!
//! Run and jump across the ledges collecting falling stars. Every star
//! launches a bomb that bounces around the arena; touching one ends the
//! session.
//!
//! The rules live in plain Rust types ([`encounter::EncounterController`] and
//! the pieces it owns) and can be driven without Bevy. The remaining modules
//! wire them to Bevy ECS and Rapier physics.

pub mod clock;
pub mod collectible;
pub mod config;
pub mod constants;
pub mod encounter;
pub mod error;
pub mod gameplay;
pub mod hazard;
pub mod hud;
pub mod level;
pub mod menu;
pub mod player;
pub mod score;
pub mod spawn;
