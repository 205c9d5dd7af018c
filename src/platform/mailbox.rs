//! Single-slot flap mailbox
//!
//! A flap produced by the inference callback (or a key press) is parked here
//! and consumed by the next physics tick. Posting over an unread flap
//! replaces it: last write wins, nothing queues.

use std::cell::Cell;

/// Holds at most one pending flap request (its post time)
#[derive(Debug, Default)]
pub struct FlapMailbox {
    slot: Cell<Option<f64>>,
}

impl FlapMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a flap requested at `now`, replacing any unread one.
    /// Returns whether an unread flap was overwritten.
    pub fn post(&self, now: f64) -> bool {
        self.slot.replace(Some(now)).is_some()
    }

    /// Take the pending flap, leaving the slot empty
    pub fn take(&self) -> Option<f64> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_empties_slot() {
        let mailbox = FlapMailbox::new();
        assert_eq!(mailbox.take(), None);
        assert!(!mailbox.post(10.0));
        assert_eq!(mailbox.take(), Some(10.0));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mailbox = FlapMailbox::new();
        mailbox.post(10.0);
        assert!(mailbox.post(20.0));
        assert_eq!(mailbox.take(), Some(20.0));
        assert!(!mailbox.post(30.0));
    }
}
