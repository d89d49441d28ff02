use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Turns wall-clock time into whole elapsed seconds, carrying the remainder
#[derive(Debug, Clone)]
pub struct SecondPulse {
    last: Instant,
}

impl SecondPulse {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole seconds elapsed since the previous drain
    pub fn drain(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.last);
        let secs = elapsed.as_secs();
        self.last += Duration::from_secs(secs);
        secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_pulse_carries_fractions() {
        let start = Instant::now();
        let mut pulse = SecondPulse::new(start);

        assert_eq!(pulse.drain(start + Duration::from_millis(700)), 0);
        assert_eq!(pulse.drain(start + Duration::from_millis(1200)), 1);
        assert_eq!(pulse.drain(start + Duration::from_millis(1900)), 0);
        assert_eq!(pulse.drain(start + Duration::from_millis(2000)), 1);
        assert_eq!(pulse.drain(start + Duration::from_millis(5500)), 3);
    }

    #[test]
    fn test_pulse_ignores_clock_going_back() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut pulse = SecondPulse::new(start);
        assert_eq!(pulse.drain(start - Duration::from_secs(5)), 0);
    }
}
