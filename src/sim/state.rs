//! Game state and core simulation types
//!
//! One `Simulation` owns the bird, the obstacle field and the round/session
//! bookkeeping. The presentation layer only ever sees a `Snapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the host to start the first round
    NotStarted,
    /// 3-2-1 before the bird is released
    Countdown,
    /// Active gameplay
    Running,
    /// Round ended, more rounds remain
    RoundOver,
    /// Final round ended (or the player quit)
    SessionOver,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    Flapped,
    Scored { score: u32 },
    RoundOver { round: u32, score: u32 },
    SessionOver { best_score: u32 },
}

/// The player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Fixed horizontal centre
    pub x: f32,
    /// Vertical centre (screen units, y grows downward)
    pub y: f32,
    pub velocity: f32,
    /// Square footprint edge length
    pub size: f32,
}

impl Bird {
    /// Bird at vertical centre, at rest
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            x: tuning.bird_x,
            y: tuning.screen_height / 2.0,
            velocity: 0.0,
            size: tuning.bird_size,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// A pipe pair with a gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Obstacle {
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Read-only view handed to the renderer each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub round: u32,
    pub score: u32,
    pub best_score: u32,
    pub terminal: bool,
    /// 3, 2, 1 during the countdown
    pub countdown: Option<u8>,
    pub bird: Bird,
    pub obstacles: Vec<Obstacle>,
}

/// Complete game/session state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    /// Current round (1-based)
    pub(crate) round: u32,
    pub(crate) score: u32,
    pub(crate) best_score: u32,
    /// Set when the bird dies this round
    pub(crate) terminal: bool,
    pub(crate) bird: Bird,
    /// Ordered by spawn, newest last
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) countdown_started_at: f64,
    pub(crate) countdown: Option<u8>,
    pub(crate) last_flap_at: Option<f64>,
    next_id: u32,
}

impl Simulation {
    /// Create a simulation with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// Create a simulation with custom tuning, rejecting values it cannot run with
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let bird = Bird::spawn(&tuning);
        Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            round: 1,
            score: 0,
            best_score: 0,
            terminal: false,
            bird,
            obstacles: Vec::new(),
            countdown_started_at: 0.0,
            countdown: None,
            last_flap_at: None,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub(crate) fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// NotStarted → Countdown
    pub fn start_round(&mut self, now: f64) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.enter_countdown(now);
    }

    /// RoundOver → Countdown for the following round
    pub fn next_round(&mut self, now: f64) {
        if self.phase != GamePhase::RoundOver {
            return;
        }
        self.round += 1;
        self.reset_round();
        self.enter_countdown(now);
    }

    fn enter_countdown(&mut self, now: f64) {
        self.phase = GamePhase::Countdown;
        self.countdown_started_at = now;
        self.countdown = Some(self.tuning.countdown_steps);
        log::info!("Round {} countdown", self.round);
    }

    /// Countdown → Running
    pub(crate) fn begin_running(&mut self) {
        self.reset_round();
        self.phase = GamePhase::Running;
        self.countdown = None;
        log::info!("Round {} started", self.round);
    }

    /// Clear everything that belongs to a single round
    fn reset_round(&mut self) {
        self.bird = Bird::spawn(&self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.terminal = false;
        self.last_flap_at = None;
    }

    /// Countdown digit at `now`, if counting down
    pub fn countdown(&self, now: f64) -> Option<u8> {
        if self.phase != GamePhase::Countdown {
            return None;
        }
        let elapsed_steps = ((now - self.countdown_started_at) / self.tuning.countdown_step_ms)
            .floor()
            .max(0.0);
        let steps = self.tuning.countdown_steps as f64;
        (elapsed_steps < steps).then(|| (steps - elapsed_steps) as u8)
    }

    /// Flap input. Accepted only while running and outside the debounce
    /// window; returns whether it was applied.
    pub fn flap(&mut self, now: f64) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        if let Some(last) = self.last_flap_at {
            if now - last < self.tuning.min_flap_interval_ms {
                return false;
            }
        }
        self.bird.velocity = self.tuning.flap_strength;
        self.last_flap_at = Some(now);
        true
    }

    /// Leave immediately from any phase. The in-progress round's score is
    /// not folded into the best score.
    pub fn quit(&mut self) {
        if self.phase != GamePhase::SessionOver {
            log::info!("Session quit in round {} (best {})", self.round, self.best_score);
        }
        self.phase = GamePhase::SessionOver;
        self.countdown = None;
    }

    /// Start over from NotStarted with a fresh session
    pub fn reset_session(&mut self) {
        self.reset_round();
        self.phase = GamePhase::NotStarted;
        self.round = 1;
        self.best_score = 0;
        self.countdown = None;
        self.next_id = 1;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round,
            score: self.score,
            best_score: self.best_score,
            terminal: self.terminal,
            countdown: self.countdown,
            bird: self.bird,
            obstacles: self.obstacles.clone(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[cfg(test)]
    pub(crate) fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }

    /// Place a hand-built obstacle (scenario tests)
    #[cfg(test)]
    pub(crate) fn push_obstacle(&mut self, x: f32, gap_top: f32, gap_bottom: f32) -> u32 {
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle {
            id,
            x,
            width: self.tuning.obstacle_width,
            gap_top,
            gap_bottom,
            passed: false,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let sim = Simulation::new(1);
        assert_eq!(sim.phase(), GamePhase::NotStarted);
        assert_eq!(sim.round(), 1);
        assert_eq!(sim.bird().y, 240.0);
        assert!(sim.obstacles().is_empty());
    }

    #[test]
    fn test_with_tuning_validates() {
        let tuning = Tuning {
            gap_size: 400.0,
            ..Tuning::default()
        };
        assert!(matches!(
            Simulation::with_tuning(tuning, 1),
            Err(TuningError::Invalid(_))
        ));

        let tuning = Tuning {
            gravity: 0.3,
            ..Tuning::default()
        };
        let sim = Simulation::with_tuning(tuning, 1).unwrap();
        assert_eq!(sim.tuning().gravity, 0.3);
    }

    #[test]
    fn test_countdown_digits() {
        let mut sim = Simulation::new(1);
        assert_eq!(sim.countdown(0.0), None);
        sim.start_round(1000.0);
        assert_eq!(sim.phase(), GamePhase::Countdown);
        assert_eq!(sim.countdown(1000.0), Some(3));
        assert_eq!(sim.countdown(2500.0), Some(2));
        assert_eq!(sim.countdown(3999.0), Some(1));
        assert_eq!(sim.countdown(4000.0), None);
    }

    #[test]
    fn test_flap_ignored_outside_running() {
        let mut sim = Simulation::new(1);
        assert!(!sim.flap(0.0));
        sim.start_round(0.0);
        assert!(!sim.flap(100.0));
        assert_eq!(sim.bird().velocity, 0.0);
    }

    #[test]
    fn test_flap_debounce() {
        let mut sim = Simulation::new(1);
        sim.phase = GamePhase::Running;

        assert!(sim.flap(1000.0));
        assert_eq!(sim.bird().velocity, -7.0);

        sim.bird_mut().velocity = 3.0;
        assert!(!sim.flap(1499.0));
        assert_eq!(sim.bird().velocity, 3.0);

        assert!(sim.flap(1500.0));
        assert_eq!(sim.bird().velocity, -7.0);
    }

    #[test]
    fn test_quit_does_not_commit_score() {
        let mut sim = Simulation::new(1);
        sim.phase = GamePhase::Running;
        sim.score = 40;
        sim.quit();
        assert_eq!(sim.phase(), GamePhase::SessionOver);
        assert_eq!(sim.best_score(), 0);

        // Other host operations are inert once the session is over
        sim.start_round(0.0);
        sim.next_round(0.0);
        assert_eq!(sim.phase(), GamePhase::SessionOver);
    }

    #[test]
    fn test_reset_session() {
        let mut sim = Simulation::new(1);
        sim.round = 3;
        sim.best_score = 50;
        sim.quit();
        sim.reset_session();
        assert_eq!(sim.phase(), GamePhase::NotStarted);
        assert_eq!(sim.round(), 1);
        assert_eq!(sim.best_score(), 0);
    }
}
