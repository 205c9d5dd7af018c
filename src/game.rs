//! Game loop controller
//!
//! Owns the smile detector, the simulation and the glue between them. The
//! host calls `frame` from its refresh clock; two throttled callbacks run
//! inside it on the same thread:
//!
//! - inference (~15 Hz): engine → detector → on a smile edge, post a flap
//! - physics (~30 Hz): take the pending flap → `Simulation::flap` → `step`
//!
//! Each callback runs to completion; round changes only happen inside `step`.

use crate::error::{InferenceError, TuningError};
use crate::gesture::{ExpressionSample, GestureDetector};
use crate::platform::{FlapMailbox, InferenceEngine, Throttle};
use crate::sim::{GameEvent, Simulation, Snapshot};
use crate::tuning::Tuning;

/// Single-threaded controller driving gesture input and physics
pub struct GameLoop {
    sim: Simulation,
    detector: GestureDetector,
    engine: Option<Box<dyn InferenceEngine>>,
    /// Why the gesture pipeline is unavailable, if it is
    gesture_error: Option<InferenceError>,
    inference_throttle: Throttle,
    physics_throttle: Throttle,
    mailbox: FlapMailbox,
    stopped: bool,
}

impl GameLoop {
    /// Loop without a gesture pipeline (keyboard/touch flaps only)
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Ok(Self {
            detector: GestureDetector::new(&tuning),
            inference_throttle: Throttle::from_hz(tuning.inference_hz),
            physics_throttle: Throttle::from_hz(tuning.physics_hz),
            sim: Simulation::with_tuning(tuning, seed)?,
            engine: None,
            gesture_error: None,
            mailbox: FlapMailbox::new(),
            stopped: false,
        })
    }

    /// Loop fed by an inference engine. A failed initialization only
    /// disables the gesture pipeline; the game still runs.
    pub fn with_inference<E: InferenceEngine + 'static>(
        tuning: Tuning,
        seed: u64,
        engine: Result<E, InferenceError>,
    ) -> Result<Self, TuningError> {
        let mut game = Self::new(tuning, seed)?;
        // The error is recorded on the loop and reported through `gesture_error`
        let _ = game.attach_inference(engine);
        Ok(game)
    }

    /// (Re)attach an inference engine, e.g. after the user retries camera
    /// access. Replaces and closes any engine already attached.
    pub fn attach_inference<E: InferenceEngine + 'static>(
        &mut self,
        engine: Result<E, InferenceError>,
    ) -> Result<(), InferenceError> {
        self.release_engine();
        self.detector.reset();
        self.inference_throttle.reset();

        match engine {
            Ok(engine) => {
                log::info!("Smile input ready");
                self.engine = Some(Box::new(engine));
                self.gesture_error = None;
                Ok(())
            }
            Err(err) => {
                log::warn!("Smile input unavailable: {}", err);
                self.gesture_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Host refresh-clock callback. Returns the events produced this frame.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.stopped {
            return events;
        }

        if self.engine.is_some() && self.inference_throttle.ready(now) {
            self.run_inference(now);
        }

        if self.physics_throttle.ready(now) {
            // Debounce against when the flap was asked for, not the tick grid
            if let Some(requested_at) = self.mailbox.take() {
                if self.sim.flap(requested_at) {
                    events.push(GameEvent::Flapped);
                }
            }
            events.extend(self.sim.step(now));
        }

        events
    }

    fn run_inference(&mut self, now: f64) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match engine.detect(now) {
            Ok(face) => {
                let sample = face.as_ref().map(ExpressionSample::from_face);
                if self.detector.update(sample) {
                    self.post_flap(now);
                }
            }
            Err(err) => {
                // No retries: the pipeline stays down until the host reattaches
                log::warn!("Smile input failed: {}", err);
                self.gesture_error = Some(err);
                self.release_engine();
                self.detector.reset();
            }
        }
    }

    /// Flap from any non-gesture source (key press, tap)
    pub fn flap(&mut self, now: f64) {
        if !self.stopped {
            self.post_flap(now);
        }
    }

    fn post_flap(&mut self, now: f64) {
        if self.mailbox.post(now) {
            log::debug!("Unread flap replaced at {:.0}ms", now);
        }
    }

    pub fn start_round(&mut self, now: f64) {
        self.sim.start_round(now);
    }

    pub fn next_round(&mut self, now: f64) {
        self.sim.next_round(now);
    }

    pub fn quit(&mut self) {
        self.sim.quit();
    }

    /// Fresh session in NotStarted; the gesture pipeline stays attached
    pub fn reset_session(&mut self) {
        self.sim.reset_session();
        self.detector.reset();
        self.mailbox.take();
    }

    /// Stop both callbacks and release the inference engine. Safe to call
    /// more than once.
    pub fn shutdown(&mut self) {
        if !self.stopped {
            log::info!("Game loop stopped");
        }
        self.stopped = true;
        self.release_engine();
        self.mailbox.take();
    }

    fn release_engine(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.close();
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    pub fn gesture_error(&self) -> Option<&InferenceError> {
        self.gesture_error.as_ref()
    }

    pub fn has_gesture_input(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.release_engine();
    }
}
