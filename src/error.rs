//! Error types
//!
//! Only two things can fail: bringing up the inference engine, and parsing a
//! tuning document. Everything else (no face, stray flaps) is normal flow.

use thiserror::Error;

/// Failure of the external face inference engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("inference engine unavailable: {0}")]
    Unavailable(String),
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("inference engine already closed")]
    Closed,
}

/// Failure loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(String),
}
