//! Sliding-window call budget for the quota-limited provider.
//!
//! The state is the ordered sequence of admitted-call instants. Timestamps
//! older than the window are pruned lazily before each admission check, and
//! the check-and-record happens under one lock so concurrent batch lookups
//! cannot oversubscribe the budget.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clock::Clock;

/// Published Alpha Vantage free-tier quota: 5 calls per rolling minute.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
pub const DEFAULT_BUDGET: u32 = 5;

/// Sliding one-minute window rate limiter.
pub struct SlidingWindow {
    calls: Mutex<VecDeque<std::time::Instant>>,
    window: Duration,
    budget: u32,
    clock: Arc<dyn Clock>,
}

impl SlidingWindow {
    pub fn new(window: Duration, budget: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            calls: Mutex::new(VecDeque::new()),
            window,
            budget,
            clock,
        }
    }

    /// Admit a call if the trailing window has budget left, recording it on
    /// success. Returns false without recording when the budget is spent.
    pub fn try_acquire(&self) -> bool {
        let now = self.clock.now();
        let mut calls = self.calls.lock().expect("rate window lock is not poisoned");

        Self::prune(&mut calls, now, self.window);
        if calls.len() >= self.budget as usize {
            return false;
        }

        calls.push_back(now);
        true
    }

    /// Remaining admissions in the current trailing window.
    pub fn remaining(&self) -> u32 {
        let now = self.clock.now();
        let mut calls = self.calls.lock().expect("rate window lock is not poisoned");

        Self::prune(&mut calls, now, self.window);
        self.budget.saturating_sub(calls.len() as u32)
    }

    pub const fn budget(&self) -> u32 {
        self.budget
    }

    fn prune(calls: &mut VecDeque<std::time::Instant>, now: std::time::Instant, window: Duration) {
        while let Some(oldest) = calls.front() {
            if now.saturating_duration_since(*oldest) >= window {
                calls.pop_front();
            } else {
                break;
            }
        }
    }
}
