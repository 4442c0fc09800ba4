use std::cell::Cell;
use std::time::Instant;

/// Monotonic wall-clock source in microseconds from an arbitrary epoch.
///
/// Only the frame pacer reads this; game logic runs on the logical clock.
pub trait TimeProvider {
    fn now_us(&self) -> u64;
}

/// Wall clock backed by `std::time::Instant`.
pub struct SystemTimeProvider {
    epoch: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Wall-clock instant matching a value returned by `now_us`.
    pub fn instant_at(&self, us: u64) -> Instant {
        self.epoch + std::time::Duration::from_micros(us)
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Manually driven clock for deterministic tests.
#[derive(Default)]
pub struct MockTimeProvider {
    current_us: Cell<u64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, us: u64) {
        self.current_us.set(us);
    }

    pub fn advance_us(&self, delta_us: u64) {
        self.current_us
            .set(self.current_us.get().saturating_add(delta_us));
    }

    pub fn advance_ms(&self, delta_ms: u64) {
        self.advance_us(delta_ms.saturating_mul(1_000));
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_provider_advance() {
        let tp = MockTimeProvider::new();
        assert_eq!(tp.now_us(), 0);
        tp.advance_ms(16);
        assert_eq!(tp.now_us(), 16_000);
        tp.advance_us(667);
        assert_eq!(tp.now_us(), 16_667);
    }

    #[test]
    fn mock_time_provider_set() {
        let tp = MockTimeProvider::new();
        tp.set_time(2_000_000);
        assert_eq!(tp.now_us(), 2_000_000);
    }

    #[test]
    fn system_time_provider_monotonic() {
        let tp = SystemTimeProvider::new();
        let t1 = tp.now_us();
        let t2 = tp.now_us();
        assert!(t2 >= t1);
        assert!(tp.instant_at(t2) >= tp.instant_at(t1));
    }
}
