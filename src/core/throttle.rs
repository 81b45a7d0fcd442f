//! Timestamp-gated throttle with a trailing emit
//!
//! High-frequency events (pointer moves) are let through at most once per
//! window. Anything arriving inside the window is kept as pending, newest
//! wins, and released by [`Throttle::poll`] once the window has passed, so
//! the final position of a burst is never dropped.

/// Throttle over values of type `T`; times are in milliseconds
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    window_ms: f64,
    last_emit: Option<f64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            last_emit: None,
            pending: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Offer a value. Returns it back if it may be applied now.
    pub fn push(&mut self, value: T, now_ms: f64) -> Option<T> {
        if self.is_open(now_ms) {
            self.last_emit = Some(now_ms);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the pending value if its window has elapsed
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        if self.pending.is_none() || !self.is_open(now_ms) {
            return None;
        }
        self.last_emit = Some(now_ms);
        self.pending.take()
    }

    /// When the pending value becomes due, if there is one
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref()?;
        Some(self.last_emit.map_or(0.0, |t| t + self.window_ms))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending value and forget the last emission
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_emit = None;
    }

    fn is_open(&self, now_ms: f64) -> bool {
        match self.last_emit {
            Some(t) => now_ms - t >= self.window_ms,
            None => true,
        }
    }
}
