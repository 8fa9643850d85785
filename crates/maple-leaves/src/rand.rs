//! Injectable randomness for spawn randomization, plus a lightweight xorshift32 PRNG

/// Random number capability used by the simulation.
///
/// Only `next_u32` is required; everything else derives from it.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Returns a float in [0, 1)
    fn next_f32(&mut self) -> f32 {
        // 24 high bits fit exactly in an f32 mantissa, so 1.0 is never produced
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max), or `min` when the range is empty
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        let v = min + self.next_f32() * (max - min);
        // Rounding can land exactly on `max` for wide ranges
        if v >= max {
            min
        } else {
            v
        }
    }

    /// Returns an integer in [0, bound), or 0 when `bound` is 0
    fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let wide = ((self.next_u32() as u64) << 32) | self.next_u32() as u64;
        wide % bound
    }

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.next_u32() & 0x8000_0000 != 0
    }

    /// Uniform index into a collection of `len` items (0 when empty)
    fn pick(&mut self, len: usize) -> usize {
        self.below(len as u64) as usize
    }
}

/// Seeded xorshift32, deterministic per seed
#[derive(Clone, Debug)]
pub struct LeafRng {
    state: u32,
}

impl LeafRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }
}

/// Seed derived from the current wall-clock time, for runs that don't need to be reproducible
pub fn seed_from_time() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(0xDEAD_BEEF)
}

impl RandomSource for LeafRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = LeafRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!(v >= 0.0 && v < 10.0);
        }
    }

    #[test]
    fn rng_unit_interval_excludes_one() {
        let mut rng = LeafRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn rng_empty_range_returns_min() {
        let mut rng = LeafRng::new(1);
        assert_eq!(rng.range(5.0, 5.0), 5.0);
        assert_eq!(rng.range(5.0, 1.0), 5.0);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn rng_below_bound() {
        let mut rng = LeafRng::new(99);
        for _ in 0..1000 {
            assert!(rng.below(200) < 200);
        }
    }

    #[test]
    fn rng_zero_seed_still_advances() {
        let mut rng = LeafRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn rng_same_seed_same_sequence() {
        let mut a = LeafRng::new(1234);
        let mut b = LeafRng::new(1234);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn rng_coin_is_roughly_fair() {
        let mut rng = LeafRng::new(5);
        let heads = (0..10_000).filter(|_| rng.coin()).count();
        assert!(heads > 4_500 && heads < 5_500, "heads = {heads}");
    }

    #[test]
    fn rng_pick_covers_all_indices() {
        let mut rng = LeafRng::new(11);
        let mut seen = [false; 7];
        for _ in 0..1000 {
            seen[rng.pick(7)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
