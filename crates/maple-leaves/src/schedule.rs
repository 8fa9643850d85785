//! Spawn timing

use crate::config::{SpawnMode, SpawnPolicy};
use crate::rand::RandomSource;

/// Tracks when the next leaf may spawn
#[derive(Debug, Clone)]
pub struct SpawnSchedule {
    policy: SpawnPolicy,
    next_spawn_ms: u64,
}

impl SpawnSchedule {
    pub fn new(policy: SpawnPolicy) -> Self {
        Self {
            next_spawn_ms: policy.first_spawn_ms,
            policy,
        }
    }

    pub fn next_spawn_ms(&self) -> u64 {
        self.next_spawn_ms
    }

    pub fn is_due(&self, time_ms: u64) -> bool {
        time_ms >= self.next_spawn_ms
    }

    /// Draw the delay until the following spawn
    pub fn interval<R: RandomSource>(&self, rng: &mut R) -> u64 {
        match self.policy.mode {
            SpawnMode::Fixed => self.policy.base_ms,
            SpawnMode::Jittered => self
                .policy
                .base_ms
                .saturating_add(rng.below(self.policy.variance_ms)),
        }
    }

    /// Record a spawn at `time_ms` and pick the next spawn time
    pub fn spawned_at<R: RandomSource>(&mut self, time_ms: u64, rng: &mut R) -> u64 {
        self.next_spawn_ms = time_ms.saturating_add(self.interval(rng));
        self.next_spawn_ms
    }

    /// Start over as if `now_ms` were the first frame
    pub fn restart_at(&mut self, now_ms: u64) {
        self.next_spawn_ms = now_ms.saturating_add(self.policy.first_spawn_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::LeafRng;

    #[test]
    fn first_spawn_time_from_policy() {
        let schedule = SpawnSchedule::new(SpawnPolicy {
            first_spawn_ms: 500,
            ..SpawnPolicy::default()
        });
        assert!(!schedule.is_due(499));
        assert!(schedule.is_due(500));
    }

    #[test]
    fn fixed_interval_ignores_variance() {
        let mut schedule = SpawnSchedule::new(SpawnPolicy {
            variance_ms: 1000,
            ..SpawnPolicy::fixed(250)
        });
        let mut rng = LeafRng::new(3);
        assert_eq!(schedule.spawned_at(0, &mut rng), 250);
        assert_eq!(schedule.spawned_at(260, &mut rng), 510);
    }

    #[test]
    fn jittered_interval_within_bounds() {
        let schedule = SpawnSchedule::new(SpawnPolicy::jittered(100, 200));
        let mut rng = LeafRng::new(42);
        let mut min = u64::MAX;
        let mut max = 0;
        for _ in 0..5000 {
            let i = schedule.interval(&mut rng);
            assert!((100..300).contains(&i), "interval {i} out of range");
            min = min.min(i);
            max = max.max(i);
        }
        // Jitter actually varies
        assert!(max - min > 150);
    }

    #[test]
    fn zero_variance_jitter_is_fixed() {
        let schedule = SpawnSchedule::new(SpawnPolicy::jittered(80, 0));
        let mut rng = LeafRng::new(9);
        for _ in 0..10 {
            assert_eq!(schedule.interval(&mut rng), 80);
        }
    }

    #[test]
    fn restart_offsets_first_spawn_from_now() {
        let mut schedule = SpawnSchedule::new(SpawnPolicy {
            first_spawn_ms: 50,
            ..SpawnPolicy::fixed(100)
        });
        let mut rng = LeafRng::new(1);
        schedule.spawned_at(1000, &mut rng);
        assert_eq!(schedule.next_spawn_ms(), 1100);
        schedule.restart_at(5000);
        assert_eq!(schedule.next_spawn_ms(), 5050);
        assert!(!schedule.is_due(5049));
    }
}
