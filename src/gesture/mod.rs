//! Smile gesture input pipeline
//!
//! Inference results in, discrete flap edges out. Knows nothing about the
//! game; any consumer can listen for the Idle → Active edge.

pub mod detector;
pub mod sample;
pub mod smoothing;

pub use detector::{GestureDetector, GestureState};
pub use sample::{Category, ExpressionSample, FaceResult, MOUTH_SMILE_LEFT, MOUTH_SMILE_RIGHT};
pub use smoothing::ScoreWindow;
