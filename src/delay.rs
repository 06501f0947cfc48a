//! Cancellable delayed values.
//!
//! A [`Delayed`] holds a value that becomes visible once a deadline passes.
//! Nothing runs in the background: the owner polls it from its event loop,
//! and cancelling simply drops the value so a late poll finds nothing.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Delayed<T> {
    due: Instant,
    value: Option<T>,
}

impl<T> Delayed<T> {
    /// Schedule `value` to become ready after `delay` from now.
    pub fn new(value: T, delay: Duration) -> Self {
        Self::starting_at(Instant::now(), value, delay)
    }

    /// Schedule `value` to become ready after `delay` from `start`.
    pub fn starting_at(start: Instant, value: T, delay: Duration) -> Self {
        Self {
            due: start + delay,
            value: Some(value),
        }
    }

    /// The value, if the deadline has passed and it was not cancelled.
    pub fn ready_at(&self, now: Instant) -> Option<&T> {
        if now >= self.due {
            self.value.as_ref()
        } else {
            None
        }
    }

    /// Time left before the value is ready.
    ///
    /// `None` once cancelled; zero once due.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.value
            .as_ref()
            .map(|_| self.due.saturating_duration_since(now))
    }

    /// Drop the pending value, returning it if it was still held.
    pub fn cancel(&mut self) -> Option<T> {
        self.value.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(2000);

    #[test]
    fn hidden_until_due() {
        let start = Instant::now();
        let delayed = Delayed::starting_at(start, "done", DELAY);

        assert_eq!(delayed.ready_at(start), None);
        assert_eq!(delayed.ready_at(start + Duration::from_millis(1999)), None);
        assert_eq!(delayed.ready_at(start + DELAY), Some(&"done"));
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let start = Instant::now();
        let delayed = Delayed::starting_at(start, 1, DELAY);

        assert_eq!(delayed.remaining_at(start), Some(DELAY));
        assert_eq!(
            delayed.remaining_at(start + Duration::from_millis(500)),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(
            delayed.remaining_at(start + Duration::from_secs(10)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn cancelled_never_fires() {
        let start = Instant::now();
        let mut delayed = Delayed::starting_at(start, 1, DELAY);

        assert_eq!(delayed.cancel(), Some(1));
        assert_eq!(delayed.ready_at(start + DELAY), None);
        assert_eq!(delayed.remaining_at(start), None);
        assert_eq!(delayed.cancel(), None);
    }

    #[test]
    fn zero_delay_is_ready_immediately() {
        let start = Instant::now();
        let delayed = Delayed::starting_at(start, 'x', Duration::ZERO);
        assert_eq!(delayed.ready_at(start), Some(&'x'));
    }
}
