//! Resize debouncing with a caller-supplied clock.
//!
//! Timestamps are plain `f64` milliseconds so the same code runs under
//! `performance.now()` in the browser and literal numbers in tests.

/// Delay before a burst of resize events settles into one re-render.
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Record an event; the deadline slides forward on every call.
    pub fn note(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The burst has settled.
    pub fn ready(&self, now_ms: f64) -> bool {
        self.deadline.is_some_and(|d| now_ms >= d)
    }

    /// Consume the deadline if settled. Returns whether it fired.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        if self.ready(now_ms) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_slides_with_each_note() {
        let mut d = Debouncer::new(100.0);
        d.note(0.0);
        d.note(80.0);
        assert!(!d.fire(120.0));
        assert!(d.fire(180.0));
        assert!(!d.pending());
    }

    #[test]
    fn fire_without_note_is_false() {
        let mut d = Debouncer::new(100.0);
        assert!(!d.fire(500.0));
    }
}
