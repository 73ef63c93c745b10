//! Trailing-edge debouncer driven by the frame loop.
//!
//! There are no timers: callers pass the current time to [`Debouncer::call`] and
//! [`Debouncer::poll`], which keeps it deterministic in tests and usable on wasm.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: TimeDelta,
    pending: Option<(T, DateTime<Utc>)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait: TimeDelta::from_std(wait).unwrap_or(TimeDelta::MAX),
            pending: None,
        }
    }

    /// Records `value` as the latest trigger and restarts the wait.
    pub fn call(&mut self, value: T, now: DateTime<Utc>) {
        self.pending = Some((value, now));
    }

    /// Yields the pending value once `wait` has elapsed since the last call.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        match &self.pending {
            Some((_, last)) if now - *last >= self.wait => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Yields the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value is due, for scheduling a repaint.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let (_, last) = self.pending.as_ref()?;
        let left = self.wait - (now - *last);
        Some(left.to_std().unwrap_or(Duration::ZERO))
    }
}
