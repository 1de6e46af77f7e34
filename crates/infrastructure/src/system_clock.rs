use chrono::{DateTime, Utc};
use dealgate_application::Clock;

/// Wall clock adapter backed by the host system time.
///
/// System time is not guaranteed to be monotonic; an NTP step backwards is
/// passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a system clock.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
