use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source for the run loop. Swappable so tests can drive
/// time by hand.
pub trait Clock {
    fn now(&self) -> Instant;

    /// block until `deadline`; returns straight away if it has passed
    fn sleep_until(&self, deadline: Instant);
}

/// real time; sleeps with `spin_sleep` so short tick periods stay accurate
/// without burning a core
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            spin_sleep::sleep(remaining);
        }
    }
}

/// virtual time: only moves when told to, or when slept on
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Cell<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// how much virtual time has gone by since creation
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn sleep_until(&self, deadline: Instant) {
        let target = deadline.saturating_duration_since(self.origin);
        if target > self.elapsed.get() {
            self.elapsed.set(target);
        }
    }
}
