//! Injectable monotonic clock so cache and rate-limiter timing is
//! deterministic under test.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Monotonic time source consulted by the cache and the rate limiter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().expect("manual clock lock is not poisoned");
        *now += delta;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().expect("manual clock lock is not poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_only_on_demand() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(61));
        assert_eq!(clock.now() - start, Duration::from_secs(61));
    }
}
