//! Face inference engine boundary
//!
//! The landmark/blendshape model is a black box. The loop only needs "zero or
//! one face per call" and a way to release the camera.

use std::collections::VecDeque;

use crate::error::InferenceError;
use crate::gesture::FaceResult;

/// External face inference engine
pub trait InferenceEngine {
    /// Run one inference at host time `now`. `Ok(None)` means no face.
    fn detect(&mut self, now: f64) -> Result<Option<FaceResult>, InferenceError>;

    /// Release the camera and model. Must tolerate repeated calls.
    fn close(&mut self);
}

impl<E: InferenceEngine + ?Sized> InferenceEngine for Box<E> {
    fn detect(&mut self, now: f64) -> Result<Option<FaceResult>, InferenceError> {
        (**self).detect(now)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Engine fed from outside, e.g. by JS pushing the latest blendshapes.
///
/// Keeps only the newest result; each `detect` consumes it, so a frame with
/// nothing pushed reads as "no face".
#[derive(Debug, Default)]
pub struct QueuedInference {
    latest: Option<Option<FaceResult>>,
    closed: bool,
}

impl QueuedInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending result (`None` = no face this frame)
    pub fn push(&mut self, face: Option<FaceResult>) {
        self.latest = Some(face);
    }
}

impl InferenceEngine for QueuedInference {
    fn detect(&mut self, _now: f64) -> Result<Option<FaceResult>, InferenceError> {
        if self.closed {
            return Err(InferenceError::Closed);
        }
        Ok(self.latest.take().flatten())
    }

    fn close(&mut self) {
        self.closed = true;
        self.latest = None;
    }
}

/// Deterministic engine replaying a fixed list of smile scores.
///
/// Each `detect` yields the next entry; `None` entries are "no face". When
/// the script runs out it loops if `repeat` is set, else reports no face.
#[derive(Debug, Clone)]
pub struct ScriptedInference {
    script: VecDeque<Option<(f32, f32)>>,
    original: Vec<Option<(f32, f32)>>,
    repeat: bool,
    closed: bool,
}

impl ScriptedInference {
    pub fn new(script: Vec<Option<(f32, f32)>>, repeat: bool) -> Self {
        Self {
            script: script.iter().copied().collect(),
            original: script,
            repeat,
            closed: false,
        }
    }
}

impl InferenceEngine for ScriptedInference {
    fn detect(&mut self, _now: f64) -> Result<Option<FaceResult>, InferenceError> {
        if self.closed {
            return Err(InferenceError::Closed);
        }
        if self.script.is_empty() && self.repeat {
            self.script.extend(self.original.iter().copied());
        }
        let next = self.script.pop_front().flatten();
        Ok(next.map(|(left, right)| FaceResult::smile(left, right)))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::ExpressionSample;

    #[test]
    fn test_queued_keeps_latest_only() {
        let mut engine = QueuedInference::new();
        assert_eq!(engine.detect(0.0).unwrap(), None);

        engine.push(Some(FaceResult::smile(0.1, 0.1)));
        engine.push(Some(FaceResult::smile(0.8, 0.6)));
        let face = engine.detect(1.0).unwrap().unwrap();
        assert!((ExpressionSample::from_face(&face).composite() - 0.7).abs() < 1e-6);
        assert_eq!(engine.detect(2.0).unwrap(), None);
    }

    #[test]
    fn test_queued_closed() {
        let mut engine = QueuedInference::new();
        engine.close();
        engine.close();
        assert!(matches!(engine.detect(0.0), Err(InferenceError::Closed)));
    }

    #[test]
    fn test_scripted_repeats() {
        let mut engine = ScriptedInference::new(vec![Some((1.0, 1.0)), None], true);
        assert!(engine.detect(0.0).unwrap().is_some());
        assert!(engine.detect(0.0).unwrap().is_none());
        assert!(engine.detect(0.0).unwrap().is_some());
    }

    #[test]
    fn test_scripted_runs_out() {
        let mut engine = ScriptedInference::new(vec![Some((1.0, 1.0))], false);
        assert!(engine.detect(0.0).unwrap().is_some());
        assert!(engine.detect(0.0).unwrap().is_none());
    }
}
