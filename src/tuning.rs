//! Data-driven game balance
//!
//! Every gameplay constant lives here so hosts (and tests) can override them
//! from a JSON document. Missing fields fall back to the `consts` defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Smile detector ===
    /// Number of composite scores averaged
    pub smoothing_window: usize,
    /// Idle → Active when the smoothed score exceeds this
    pub trigger_threshold: f32,
    /// Active → Idle when the smoothed score falls below this
    pub reset_threshold: f32,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Bird ===
    pub bird_x: f32,
    pub bird_size: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub flap_strength: f32,
    pub min_flap_interval_ms: f64,
    pub hitbox_forgiveness: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_speed: f32,
    pub gap_size: f32,
    pub gap_margin: f32,
    pub spawn_distance: f32,
    pub score_per_obstacle: u32,

    // === Session ===
    pub rounds: u32,
    pub countdown_steps: u8,
    pub countdown_step_ms: f64,

    // === Loop rates ===
    pub inference_hz: f64,
    pub physics_hz: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            smoothing_window: SMOOTHING_WINDOW,
            trigger_threshold: TRIGGER_THRESHOLD,
            reset_threshold: RESET_THRESHOLD,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            bird_x: BIRD_X,
            bird_size: BIRD_SIZE,
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            flap_strength: FLAP_STRENGTH,
            min_flap_interval_ms: MIN_FLAP_INTERVAL_MS,
            hitbox_forgiveness: HITBOX_FORGIVENESS,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            gap_size: GAP_SIZE,
            gap_margin: GAP_MARGIN,
            spawn_distance: SPAWN_DISTANCE,
            score_per_obstacle: SCORE_PER_OBSTACLE,

            rounds: ROUNDS_PER_SESSION,
            countdown_steps: COUNTDOWN_STEPS,
            countdown_step_ms: COUNTDOWN_STEP_MS,

            inference_hz: INFERENCE_HZ,
            physics_hz: PHYSICS_HZ,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the defaults)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            self.trigger_threshold,
            self.reset_threshold,
            self.screen_width,
            self.screen_height,
            self.bird_x,
            self.bird_size,
            self.gravity,
            self.terminal_velocity,
            self.flap_strength,
            self.hitbox_forgiveness,
            self.obstacle_width,
            self.obstacle_speed,
            self.gap_size,
            self.gap_margin,
            self.spawn_distance,
        ];
        let times = [
            self.min_flap_interval_ms,
            self.countdown_step_ms,
            self.inference_hz,
            self.physics_hz,
        ];
        if !floats.iter().all(|v| v.is_finite()) || !times.iter().all(|v| v.is_finite()) {
            return Err(invalid("all values must be finite"));
        }
        if self.smoothing_window == 0 {
            return Err(invalid("smoothing_window must be at least 1"));
        }
        if !(self.reset_threshold < self.trigger_threshold) {
            return Err(invalid("reset_threshold must be below trigger_threshold"));
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(invalid("screen dimensions must be positive"));
        }
        if self.bird_size <= 0.0 || self.bird_size >= self.screen_height {
            return Err(invalid("bird_size must fit on screen"));
        }
        if !(0.0..0.5).contains(&self.hitbox_forgiveness) {
            return Err(invalid("hitbox_forgiveness must be in [0, 0.5)"));
        }
        if self.gap_size <= 0.0 || self.gap_size + 2.0 * self.gap_margin > self.screen_height {
            return Err(invalid("gap_size plus margins must fit on screen"));
        }
        if self.obstacle_width <= 0.0 || self.obstacle_speed <= 0.0 {
            return Err(invalid("obstacles need positive width and speed"));
        }
        if self.rounds == 0 {
            return Err(invalid("rounds must be at least 1"));
        }
        if self.inference_hz <= 0.0 || self.physics_hz <= 0.0 {
            return Err(invalid("tick rates must be positive"));
        }
        Ok(())
    }

    /// Lowest and highest allowed gap top
    pub fn gap_top_range(&self) -> (f32, f32) {
        (
            self.gap_margin,
            self.screen_height - self.gap_size - self.gap_margin,
        )
    }

    /// Total countdown length before a round starts running
    pub fn countdown_ms(&self) -> f64 {
        self.countdown_steps as f64 * self.countdown_step_ms
    }
}

fn invalid(msg: &str) -> TuningError {
    TuningError::Invalid(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gap_top_range(), (80.0, 200.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.3, "rounds": 5 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.3);
        assert_eq!(tuning.rounds, 5);
        assert_eq!(tuning.smoothing_window, SMOOTHING_WINDOW);
        assert_eq!(tuning.flap_strength, FLAP_STRENGTH);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let err = Tuning::from_json(r#"{ "trigger_threshold": 0.3, "reset_threshold": 0.5 }"#);
        assert!(matches!(err, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_rejects_gap_that_cannot_fit() {
        let tuning = Tuning {
            gap_size: 400.0,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let tuning = Tuning {
            gap_margin: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
