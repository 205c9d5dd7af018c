//! Smile gesture detector
//!
//! Turns a noisy per-frame smile score into a single "flap" edge:
//! scores are averaged over a short window, then run through a two-threshold
//! (trigger/reset) hysteresis so the state cannot chatter near a boundary.

use serde::{Deserialize, Serialize};

use super::sample::ExpressionSample;
use super::smoothing::ScoreWindow;
use crate::tuning::Tuning;

/// Whether the player is currently smiling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Idle,
    Active,
}

/// Smoothing + hysteresis over smile scores
#[derive(Debug, Clone)]
pub struct GestureDetector {
    window: ScoreWindow,
    trigger: f32,
    reset: f32,
    state: GestureState,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl GestureDetector {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            window: ScoreWindow::new(tuning.smoothing_window),
            trigger: tuning.trigger_threshold,
            reset: tuning.reset_threshold,
            state: GestureState::Idle,
        }
    }

    /// Feed one inference result (`None` = no face, composite 0)
    pub fn ingest(&mut self, sample: Option<ExpressionSample>) {
        let composite = sample.map(|s| s.composite()).unwrap_or(0.0);
        self.window.push(composite);
    }

    /// Apply hysteresis to the smoothed score.
    ///
    /// Returns `true` only on the Idle → Active edge. Falling back to Idle is
    /// silent.
    pub fn evaluate(&mut self) -> bool {
        let smoothed = self.window.mean();
        match self.state {
            GestureState::Idle if smoothed > self.trigger => {
                self.state = GestureState::Active;
                log::debug!("Smile detected (smoothed {:.2})", smoothed);
                true
            }
            GestureState::Active if smoothed < self.reset => {
                self.state = GestureState::Idle;
                log::debug!("Smile released (smoothed {:.2})", smoothed);
                false
            }
            _ => false,
        }
    }

    /// Ingest then evaluate; what the inference callback calls each frame
    pub fn update(&mut self, sample: Option<ExpressionSample>) -> bool {
        self.ingest(sample);
        self.evaluate()
    }

    pub fn smoothed(&self) -> f32 {
        self.window.mean()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GestureState::Active
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Forget all history (pipeline restart)
    pub fn reset(&mut self) {
        self.window.clear();
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn composite(score: f32) -> Option<ExpressionSample> {
        Some(ExpressionSample::new(score, score))
    }

    #[test]
    fn test_empty_detector_never_triggers() {
        let mut detector = GestureDetector::default();
        assert_eq!(detector.smoothed(), 0.0);
        assert!(!detector.evaluate());
        assert_eq!(detector.state(), GestureState::Idle);
    }

    #[test]
    fn test_triggers_on_fourth_strong_sample() {
        let mut detector = GestureDetector::default();
        let scores = [0.0, 0.0, 0.0, 0.0, 0.0, 0.9, 0.9, 0.9, 0.9, 0.9];

        let events: Vec<bool> = scores.iter().map(|s| detector.update(composite(*s))).collect();

        // 3×0.9 + 2×0 = 0.54 stays below, 4×0.9 / 5 = 0.72 triggers
        assert_eq!(
            events,
            vec![false, false, false, false, false, false, false, false, true, false]
        );
        assert!((detector.smoothed() - 0.9).abs() < 1e-5);
        assert!(detector.is_active());
    }

    #[test]
    fn test_no_face_decays_to_idle() {
        let mut detector = GestureDetector::default();
        for _ in 0..5 {
            detector.update(composite(1.0));
        }
        assert!(detector.is_active());

        for _ in 0..5 {
            assert!(!detector.update(None));
        }
        assert_eq!(detector.state(), GestureState::Idle);
    }

    #[test]
    fn test_one_event_per_crossing() {
        let mut detector = GestureDetector::default();
        let mut events = 0;
        // Two smiles separated by a full release
        for round in 0..2 {
            for _ in 0..20 {
                events += detector.update(composite(0.95)) as u32;
            }
            for _ in 0..5 {
                events += detector.update(composite(0.0)) as u32;
            }
            assert_eq!(events, round + 1);
        }
    }

    #[test]
    fn test_dead_zone_keeps_active() {
        let mut detector = GestureDetector::default();
        for _ in 0..5 {
            detector.update(composite(0.9));
        }
        for _ in 0..10 {
            detector.update(composite(0.45));
        }
        assert!(detector.is_active());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut detector = GestureDetector::default();
        for _ in 0..5 {
            detector.update(composite(0.9));
        }
        detector.reset();
        assert_eq!(detector.window_len(), 0);
        assert_eq!(detector.state(), GestureState::Idle);
    }

    proptest! {
        #[test]
        fn prop_dead_zone_never_toggles(
            warmup in prop::bool::ANY,
            scores in prop::collection::vec(0.401f32..0.599, 1..60),
        ) {
            let mut detector = GestureDetector::default();
            // Fill the window so the mean itself sits in the dead zone
            for _ in 0..5 {
                detector.update(composite(if warmup { 0.9 } else { 0.0 }));
            }
            for _ in 0..5 {
                detector.update(composite(0.5));
            }
            let before = detector.state();
            for s in scores {
                prop_assert!(!detector.update(composite(s)));
                prop_assert_eq!(detector.state(), before);
            }
        }

        #[test]
        fn prop_events_match_upward_crossings(scores in prop::collection::vec(0.0f32..=1.0, 0..80)) {
            let mut detector = GestureDetector::default();
            let mut events = 0;
            let mut activations = 0;
            let mut was_active = false;
            for s in scores {
                events += detector.update(composite(s)) as u32;
                if detector.is_active() && !was_active {
                    activations += 1;
                }
                was_active = detector.is_active();
                prop_assert!(detector.window_len() <= 5);
            }
            prop_assert_eq!(events, activations);
        }
    }
}
