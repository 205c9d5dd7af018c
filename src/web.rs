//! Browser binding
//!
//! JS owns the camera, the landmark model and the canvas. It pushes each
//! blendshape result in, drives `frame` from `requestAnimationFrame`, and
//! reads the snapshot back as JSON for drawing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::error::InferenceError;
use crate::game::GameLoop;
use crate::gesture::FaceResult;
use crate::platform::{InferenceEngine, QueuedInference};
use crate::tuning::Tuning;

/// Engine handle shared between the loop and the JS-facing wrapper
#[derive(Clone, Default)]
struct SharedInference(Rc<RefCell<QueuedInference>>);

impl InferenceEngine for SharedInference {
    fn detect(&mut self, now: f64) -> Result<Option<FaceResult>, InferenceError> {
        self.0.borrow_mut().detect(now)
    }

    fn close(&mut self) {
        self.0.borrow_mut().close();
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Ignore "already initialized" when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Smile Flap starting...");
}

/// Game instance exposed to JS
#[wasm_bindgen]
pub struct WebGame {
    game: GameLoop,
    inference: SharedInference,
}

#[wasm_bindgen]
impl WebGame {
    /// `seed` of 0 picks one from the clock; `tuning_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let seed = if seed > 0.0 {
            seed as u64
        } else {
            js_sys::Date::now() as u64
        };
        let game = GameLoop::new(tuning, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            game,
            inference: SharedInference::default(),
        })
    }

    /// Camera and model are up; start reading pushed faces
    #[wasm_bindgen(js_name = inferenceReady)]
    pub fn inference_ready(&mut self) {
        self.inference = SharedInference::default();
        let _ = self.game.attach_inference(Ok(self.inference.clone()));
    }

    /// Camera or model failed to start; keyboard/touch play continues
    #[wasm_bindgen(js_name = inferenceFailed)]
    pub fn inference_failed(&mut self, reason: &str, permission_denied: bool) {
        let err = if permission_denied {
            InferenceError::PermissionDenied
        } else {
            InferenceError::Unavailable(reason.to_string())
        };
        let _ = self.game.attach_inference::<SharedInference>(Err(err));
    }

    /// Latest blendshapes as JSON (`{"categories": [...]}`), or empty for no face
    #[wasm_bindgen(js_name = pushFace)]
    pub fn push_face(&mut self, face_json: &str) {
        let face = if face_json.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<FaceResult>(face_json) {
                Ok(face) => Some(face),
                Err(e) => {
                    log::warn!("Ignoring malformed face result: {}", e);
                    None
                }
            }
        };
        self.inference.0.borrow_mut().push(face);
    }

    /// Refresh-clock callback; returns this frame's events as JSON
    pub fn frame(&mut self, now: f64) -> String {
        let events = self.game.frame(now);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn flap(&mut self, now: f64) {
        self.game.flap(now);
    }

    #[wasm_bindgen(js_name = startRound)]
    pub fn start_round(&mut self, now: f64) {
        self.game.start_round(now);
    }

    #[wasm_bindgen(js_name = nextRound)]
    pub fn next_round(&mut self, now: f64) {
        self.game.next_round(now);
    }

    pub fn quit(&mut self) {
        self.game.quit();
    }

    #[wasm_bindgen(js_name = resetSession)]
    pub fn reset_session(&mut self) {
        self.game.reset_session();
    }

    pub fn shutdown(&mut self) {
        self.game.shutdown();
    }

    #[wasm_bindgen(js_name = isStopped)]
    pub fn is_stopped(&self) -> bool {
        self.game.is_stopped()
    }

    #[wasm_bindgen(js_name = gestureError)]
    pub fn gesture_error(&self) -> Option<String> {
        self.game.gesture_error().map(|e| e.to_string())
    }

    /// Current snapshot as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}
