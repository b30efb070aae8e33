use std::time::{Duration, Instant};

/// Byte-sized countdown; one tick takes one off, stopping at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTimer {
    value: u8,
}

impl CountdownTimer {
    pub fn new() -> Self {
        CountdownTimer { value: 0 }
    }

    pub fn get(&self) -> u8 {
        self.value
    }

    pub fn set(&mut self, value: u8) {
        self.value = value;
    }

    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }

    pub fn is_running(&self) -> bool {
        self.value > 0
    }
}

/// Decides when the next instruction is due: at most one per period.
/// `last` is `None` until something has run, so the very first poll is
/// always due.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    period: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(period: Duration) -> Self {
        Pacer { period, last: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn last(&self) -> Option<Instant> {
        self.last
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.period,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// earliest instant at which `is_due` can be true; `None` means now
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last.map(|last| last + self.period)
    }

    /// back to "never executed"
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_floors_at_zero() {
        let mut t = CountdownTimer::new();
        t.tick();
        assert_eq!(t.get(), 0);
        t.set(2);
        assert!(t.is_running());
        t.tick();
        assert_eq!(t.get(), 1);
        t.tick();
        t.tick();
        assert_eq!(t.get(), 0);
        assert!(!t.is_running());
    }

    #[test]
    fn test_pacer_first_poll_is_due() {
        let p = Pacer::new(Duration::from_millis(10));
        assert!(p.is_due(Instant::now()));
        assert_eq!(p.next_deadline(), None);
    }

    #[test]
    fn test_pacer_waits_a_full_period() {
        let t0 = Instant::now();
        let mut p = Pacer::new(Duration::from_millis(10));
        p.mark(t0);
        assert!(!p.is_due(t0));
        assert!(!p.is_due(t0 + Duration::from_millis(9)));
        assert!(p.is_due(t0 + Duration::from_millis(10)));
        assert_eq!(p.next_deadline(), Some(t0 + Duration::from_millis(10)));
        p.reset();
        assert_eq!(p.last(), None);
    }

    #[test]
    fn test_zero_period_is_always_due() {
        let t0 = Instant::now();
        let mut p = Pacer::new(Duration::ZERO);
        p.mark(t0);
        assert!(p.is_due(t0));
    }
}
