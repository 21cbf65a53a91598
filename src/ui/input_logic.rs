//! Level-sampled button debouncing.
//!
//! The button line is polled once per tick.  A raw-active sample becomes a
//! press only when at least `window_ms` have elapsed since the previously
//! accepted press; everything inside the window is dropped.  Holding the
//! button therefore repeats once per window.

use crate::Millis;

#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window_ms: Millis,
    last_accepted: Option<Millis>,
}

impl Debouncer {
    pub const fn new(window_ms: Millis) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Feed one raw sample taken at `now`; returns `true` for an accepted press.
    pub fn sample(&mut self, raw_active: bool, now: Millis) -> bool {
        if !raw_active {
            return false;
        }
        if let Some(last) = self.last_accepted {
            if now.saturating_sub(last) < self.window_ms {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }
}
