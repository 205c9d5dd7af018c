//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, host-throttled
//! - Seeded RNG only (obstacle gap placement)
//! - Obstacles kept in spawn order
//! - No rendering, platform or gesture dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, bird_hitbox, check_collision, hits_obstacle, out_of_bounds};
pub use state::{Bird, GameEvent, GamePhase, Obstacle, Simulation, Snapshot};
pub use tick::tick;
