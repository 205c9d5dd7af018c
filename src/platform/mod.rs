//! Platform abstraction layer
//!
//! Handles the host-facing plumbing around the two cores:
//! - Time/ticks (skip-if-too-soon throttles)
//! - Input hand-off (single-slot flap mailbox)
//! - Face inference engine boundary

pub mod inference;
pub mod mailbox;
pub mod throttle;

pub use inference::{InferenceEngine, QueuedInference, ScriptedInference};
pub use mailbox::FlapMailbox;
pub use throttle::Throttle;
