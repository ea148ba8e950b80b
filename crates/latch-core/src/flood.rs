//! Flood control for repeated passcode failures

use std::time::{Duration, Instant};

/// Delay schedule applied after consecutive bad tries
#[derive(Clone, Debug)]
pub struct FloodPolicy {
    /// Thresholds and the wait they impose since the last try
    /// Format: (min_bad_tries, wait)
    thresholds: Vec<(u32, Duration)>,
}

impl Default for FloodPolicy {
    fn default() -> Self {
        Self {
            thresholds: vec![
                // Tries 1-2: free
                (3, Duration::from_secs(5)),
                (4, Duration::from_secs(10)),
                (5, Duration::from_secs(15)),
                (6, Duration::from_secs(20)),
                (7, Duration::from_secs(25)),
                // 8+: 30 seconds between every try
                (8, Duration::from_secs(30)),
            ],
        }
    }
}

impl FloodPolicy {
    /// Get the required wait for a given number of bad tries
    pub fn delay_for(&self, bad_tries: u32) -> Option<Duration> {
        self.thresholds
            .iter()
            .rev()
            .find(|(min, _)| bad_tries >= *min)
            .map(|(_, wait)| *wait)
    }

    /// Number of bad tries allowed before any wait applies
    pub fn free_tries(&self) -> u32 {
        self.thresholds.first().map(|(min, _)| *min).unwrap_or(u32::MAX)
    }

    /// Create a custom policy
    pub fn custom(thresholds: Vec<(u32, Duration)>) -> Self {
        Self { thresholds }
    }
}

/// Process-wide bad-try bookkeeping
#[derive(Clone, Debug, Default)]
pub struct FloodControl {
    policy: FloodPolicy,
    bad_tries: u32,
    last_try: Option<Instant>,
}

impl FloodControl {
    /// Create flood control with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create flood control with a custom policy
    pub fn with_policy(policy: FloodPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn bad_tries(&self) -> u32 {
        self.bad_tries
    }

    pub fn set_bad_tries(&mut self, bad_tries: u32) {
        self.bad_tries = bad_tries;
    }

    pub fn last_try_time(&self) -> Option<Instant> {
        self.last_try
    }

    pub fn set_last_try_time(&mut self, at: Instant) {
        self.last_try = Some(at);
    }

    /// Whether another attempt is allowed right now
    pub fn can_try(&self) -> bool {
        self.can_try_at(Instant::now())
    }

    /// Whether another attempt is allowed at `now`
    pub fn can_try_at(&self, now: Instant) -> bool {
        self.remaining_wait_at(now).is_none()
    }

    /// Time left before the next attempt is allowed, if any
    pub fn remaining_wait_at(&self, now: Instant) -> Option<Duration> {
        let wait = self.policy.delay_for(self.bad_tries)?;
        let last = self.last_try?;
        let elapsed = now.saturating_duration_since(last);
        (elapsed < wait).then(|| wait - elapsed)
    }

    pub fn policy(&self) -> &FloodPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, None)]
    #[case(2, None)]
    #[case(3, Some(5))]
    #[case(5, Some(15))]
    #[case(7, Some(25))]
    #[case(8, Some(30))]
    #[case(100, Some(30))]
    fn test_default_policy(#[case] bad_tries: u32, #[case] secs: Option<u64>) {
        let policy = FloodPolicy::default();
        assert_eq!(policy.delay_for(bad_tries), secs.map(Duration::from_secs));
    }

    #[test]
    fn test_free_tries_always_allowed() {
        let mut flood = FloodControl::new();
        let now = Instant::now();
        flood.set_bad_tries(2);
        flood.set_last_try_time(now);
        assert!(flood.can_try_at(now));
    }

    #[test]
    fn test_wait_after_threshold() {
        let mut flood = FloodControl::new();
        let now = Instant::now();
        flood.set_bad_tries(3);
        flood.set_last_try_time(now);

        assert!(!flood.can_try_at(now + Duration::from_secs(4)));
        assert_eq!(
            flood.remaining_wait_at(now + Duration::from_secs(2)),
            Some(Duration::from_secs(3))
        );
        assert!(flood.can_try_at(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_reset_reopens_gate() {
        let mut flood = FloodControl::new();
        let now = Instant::now();
        flood.set_bad_tries(9);
        flood.set_last_try_time(now);
        assert!(!flood.can_try_at(now));

        flood.set_bad_tries(0);
        assert!(flood.can_try_at(now));
    }
}
