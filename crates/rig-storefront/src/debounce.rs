//! Keyed request debouncing.

use std::time::{Duration, Instant};

/// Coalesces rapid repeat requests for the same key.
///
/// A request is admitted when its key differs from the last admitted key,
/// or when the window has elapsed since the last admission. Callers pass
/// the clock in, which keeps the decision testable.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last: Option<(String, Instant)>,
}

impl Debouncer {
    /// Create a debouncer with the given coalescing window.
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Decide whether a request for `key` at `now` should run.
    pub fn admit(&mut self, key: &str, now: Instant) -> bool {
        if let Some((last_key, at)) = &self.last {
            if last_key == key && now.duration_since(*at) < self.window {
                return false;
            }
        }
        self.last = Some((key.to_string(), now));
        true
    }
}
