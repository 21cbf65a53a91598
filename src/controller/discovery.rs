//! Discovery timeout monitor
//!
//! Bounds how long a single discovery cycle may run.  There is exactly
//! one cycle at a time; starting a new one replaces the old deadline.

use crate::Millis;

#[derive(Clone, Copy, Debug, Default)]
pub struct DiscoveryMonitor {
    deadline: Option<Millis>,
}

impl DiscoveryMonitor {
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Open a cycle started at `now` lasting `timeout_ms`.
    pub fn start(&mut self, now: Millis, timeout_ms: Millis) {
        self.deadline = Some(now.saturating_add(timeout_ms));
    }

    /// Close the current cycle (found, cancelled or timed out).
    pub fn finish(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// `true` once `now` is strictly past the deadline of an open cycle.
    pub fn expired(&self, now: Millis) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }
}
