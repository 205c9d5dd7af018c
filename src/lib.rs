//! Smile Flap - A flappy-style game flown by smiling at a webcam
//!
//! Core modules:
//! - `gesture`: Smile detector (smoothing + hysteresis → flap events)
//! - `sim`: Deterministic simulation (physics, collisions, rounds)
//! - `platform`: Tick throttles, flap mailbox, inference engine boundary
//! - `game`: Loop controller wiring the detector into the simulation
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod gesture;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{InferenceError, TuningError};
pub use game::GameLoop;
pub use gesture::{ExpressionSample, GestureDetector, GestureState};
pub use sim::{GameEvent, GamePhase, Simulation, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Conceptual screen resolution (all physics runs in these units)
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 120.0;
    pub const BIRD_SIZE: f32 = 60.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.2;
    /// Downward speed cap (no cap on the upward side)
    pub const TERMINAL_VELOCITY: f32 = 10.0;
    /// Velocity set by a flap (overwrites, not additive)
    pub const FLAP_STRENGTH: f32 = -7.0;
    /// Minimum time between accepted flaps
    pub const MIN_FLAP_INTERVAL_MS: f64 = 500.0;
    /// Hitbox shrink on every side, as a fraction of bird size
    pub const HITBOX_FORGIVENESS: f32 = 0.1;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_SPEED: f32 = 2.5;
    pub const GAP_SIZE: f32 = 200.0;
    /// Minimum distance between a gap and the top/bottom of the screen
    pub const GAP_MARGIN: f32 = 80.0;
    /// Distance the newest obstacle travels before the next one spawns
    pub const SPAWN_DISTANCE: f32 = 300.0;
    pub const SCORE_PER_OBSTACLE: u32 = 10;

    /// Session layout
    pub const ROUNDS_PER_SESSION: u32 = 3;
    /// 3-2-1 countdown, one second per step
    pub const COUNTDOWN_STEPS: u8 = 3;
    pub const COUNTDOWN_STEP_MS: f64 = 1000.0;

    /// Smile detector defaults
    pub const SMOOTHING_WINDOW: usize = 5;
    pub const TRIGGER_THRESHOLD: f32 = 0.6;
    pub const RESET_THRESHOLD: f32 = 0.4;

    /// Callback rates (skip-if-too-soon throttles)
    pub const INFERENCE_HZ: f64 = 15.0;
    pub const PHYSICS_HZ: f64 = 30.0;
}
