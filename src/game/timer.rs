use tracing::trace;

/// One-shot countdown on the logical clock (microseconds).
///
/// `start_us == 0 && lifetime_us == 0` is the idle sentinel. A running timer
/// ignores further `start` calls until it is stopped, so it can never be
/// extended or redirected mid-flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTimer {
    start_us: u64,
    lifetime_us: u64,
}

impl RoundTimer {
    pub const fn new() -> Self {
        Self {
            start_us: 0,
            lifetime_us: 0,
        }
    }

    /// Start counting `lifetime_us` from `now_us`. No-op while running.
    /// Returns whether the timer was started.
    pub fn start(&mut self, now_us: u64, lifetime_us: u64) -> bool {
        if self.is_running() {
            return false;
        }
        self.start_us = now_us;
        self.lifetime_us = lifetime_us;
        trace!(start_us = now_us, lifetime_us, "timer started");
        true
    }

    /// Force the timer back to idle.
    pub fn stop(&mut self) {
        if self.is_running() {
            trace!(start_us = self.start_us, lifetime_us = self.lifetime_us, "timer stopped");
        }
        self.start_us = 0;
        self.lifetime_us = 0;
    }

    pub const fn is_running(&self) -> bool {
        self.start_us != 0 || self.lifetime_us != 0
    }

    /// `now - start >= lifetime`. Always true for an idle timer.
    pub const fn is_done(&self, now_us: u64) -> bool {
        self.elapsed(now_us) >= self.lifetime_us
    }

    /// Time since start, never negative.
    pub const fn elapsed(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.start_us)
    }

    pub const fn remaining(&self, now_us: u64) -> u64 {
        self.lifetime_us.saturating_sub(self.elapsed(now_us))
    }

    /// Logical time at which the timer runs out.
    pub const fn deadline(&self) -> u64 {
        self.start_us.saturating_add(self.lifetime_us)
    }

    pub const fn start_time(&self) -> u64 {
        self.start_us
    }

    pub const fn lifetime(&self) -> u64 {
        self.lifetime_us
    }
}
