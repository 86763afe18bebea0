//! Resize buffering.
//!
//! Repeated layout requests within the buffer window collapse into one. The
//! clock is supplied by the caller so buffering is deterministic.

use std::time::{Duration, Instant};

/// A debounced layout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeBuffer {
    window: Duration,
    deadline: Option<Instant>,
}

impl ResizeBuffer {
    /// A buffer with nothing pending.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The debounce window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Record a request at `now`, pushing the deadline back.
    pub fn request(&mut self, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.deadline = Some(deadline);
        deadline
    }

    /// Pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a request is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the pending request if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending request. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
