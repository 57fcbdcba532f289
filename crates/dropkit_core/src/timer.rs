//! Restartable trailing debounce
//!
//! A [`Debouncer`] holds at most one pending value with a deadline. Every
//! [`schedule`](Debouncer::schedule) replaces the pending value and pushes
//! the deadline out again, so only the last value of a burst survives.
//! The host's frame or event loop calls [`poll`](Debouncer::poll) with the
//! current time; once the quiet period has elapsed the value is released
//! exactly once.
//!
//! There is no background thread and no timer handle to leak: dropping or
//! cancelling the debouncer discards the pending value, so a stale update can
//! never be delivered afterwards.

/// Pending value awaiting its deadline
#[derive(Clone, Debug)]
struct Pending<T> {
    value: T,
    deadline_ms: u64,
}

/// Trailing-edge debouncer polled with the current time
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// The quiet period in milliseconds
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Schedule `value`, replacing anything pending and restarting the window
    pub fn schedule(&mut self, value: T, now_ms: u64) {
        let deadline_ms = now_ms.saturating_add(self.delay_ms);
        if self.pending.is_some() {
            tracing::trace!(deadline_ms, "debounce rescheduled");
        }
        self.pending = Some(Pending { value, deadline_ms });
    }

    /// Release the pending value if its deadline has passed
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some(ref p) if now_ms >= p.deadline_ms => {
                tracing::trace!(now_ms, "debounce fired");
                self.pending.take().map(|p| p.value)
            }
            _ => None,
        }
    }

    /// Drop any pending value. Returns true if something was pending.
    pub fn cancel(&mut self) -> bool {
        let had_pending = self.pending.take().is_some();
        if had_pending {
            tracing::trace!("debounce cancelled");
        }
        had_pending
    }

    /// Release the pending value immediately, ignoring the deadline
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending value, if any
    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiet_period() {
        let mut d = Debouncer::new(150);
        d.schedule("a", 0);
        assert_eq!(d.poll(149), None);
        assert_eq!(d.poll(150), Some("a"));
        // Released exactly once
        assert_eq!(d.poll(500), None);
    }

    #[test]
    fn test_reschedule_restarts_window() {
        let mut d = Debouncer::new(150);
        d.schedule("o", 0);
        d.schedule("op", 100);
        d.schedule("opt", 200);
        assert_eq!(d.poll(300), None);
        assert_eq!(d.deadline_ms(), Some(350));
        assert_eq!(d.poll(350), Some("opt"));
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut d = Debouncer::new(150);
        d.schedule(1, 0);
        assert!(d.cancel());
        assert!(!d.is_pending());
        assert_eq!(d.poll(1_000), None);
        assert!(!d.cancel());
    }

    #[test]
    fn test_flush_ignores_deadline() {
        let mut d = Debouncer::new(150);
        d.schedule(7, 0);
        assert_eq!(d.flush(), Some(7));
        assert_eq!(d.poll(1_000), None);
    }

    #[test]
    fn test_zero_delay_fires_on_next_poll() {
        let mut d = Debouncer::new(0);
        d.schedule('x', 10);
        assert_eq!(d.poll(10), Some('x'));
    }
}
