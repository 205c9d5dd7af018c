//! Skip-if-too-soon tick throttle
//!
//! Both periodic callbacks ride the host's refresh clock. A callback that
//! arrives before its interval has elapsed is dropped, never queued.

/// Rate limiter for a periodic callback
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    last_run: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_run: None,
        }
    }

    /// Throttle for a rate in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self::new(1000.0 / hz)
    }

    /// Whether the callback should run at `now`; records the run if so
    pub fn ready(&mut self, now: f64) -> bool {
        match self.last_run {
            Some(last) if now - last < self.interval_ms => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }

    /// Forget the last run so the next call fires immediately
    pub fn reset(&mut self) {
        self.last_run = None;
    }
}
