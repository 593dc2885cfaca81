use std::time::{Duration, Instant};

/// Default quiet period before typed text is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Delays committing raw input until it has been stable for `delay`.
///
/// Every [`input`](Self::input) restarts the timer; [`poll`](Self::poll)
/// yields the latest text once the timer has elapsed, exactly once.
/// Instants are passed in so the caller owns the clock.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<String>,
    last_input: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_input: None,
        }
    }

    /// Quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new raw value and restarts the timer.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(text.into());
        self.last_input = Some(now);
    }

    /// Returns the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last = self.last_input?;
        if now.saturating_duration_since(last) < self.delay {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    /// Drops the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_input = None;
    }

    /// Returns `true` while a value is waiting for the quiet period.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
