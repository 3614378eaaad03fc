//! Leading-edge event throttle.
//!
//! The first event goes through; anything arriving within `window` of the
//! last admitted event is dropped.  There is no trailing emission, so a
//! burst that ends inside the window loses its final sample.

use std::time::Duration;

use tokio::time::Instant;

/// Default scroll throttle window.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last_admitted: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_admitted: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether an event observed at `now` is delivered.
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last_admitted {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last_admitted = Some(now);
                true
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_is_always_admitted() {
        let mut t = Throttle::default();
        assert!(t.admit(Instant::now()));
    }

    #[test]
    fn events_inside_window_are_dropped() {
        let mut t = Throttle::new(Duration::from_millis(10));
        let t0 = Instant::now();
        assert!(t.admit(t0));
        assert!(!t.admit(t0 + Duration::from_millis(3)));
        assert!(!t.admit(t0 + Duration::from_millis(9)));
        assert!(t.admit(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn window_restarts_from_last_admitted_event() {
        let mut t = Throttle::new(Duration::from_millis(10));
        let t0 = Instant::now();
        assert!(t.admit(t0));
        // Dropped events don't extend the window.
        assert!(!t.admit(t0 + Duration::from_millis(8)));
        assert!(t.admit(t0 + Duration::from_millis(12)));
        assert!(!t.admit(t0 + Duration::from_millis(21)));
        assert!(t.admit(t0 + Duration::from_millis(22)));
    }
}
