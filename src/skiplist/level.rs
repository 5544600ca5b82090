//! Node height generation.
//!
//! Height is the only source of randomness in the skip list, so it sits behind
//! a trait: production code uses [`Geometric`], tests swap in [`Uniform`] or
//! [`Fixed`] to force degenerate shapes (a plain linked list, a full tower).

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_core::RngCore;

/// Draws the highest level index of a freshly inserted node.
pub trait LevelGenerator {
    /// Return a level in `0..=max_level`. Anything larger is rejected by the
    /// list with `HeightBoundExceeded`.
    fn level(&mut self, max_level: usize) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    fn level(&mut self, max_level: usize) -> usize {
        (**self).level(max_level)
    }
}

/// P(level >= k) = 2^-k, truncated at `max_level`.
///
/// Takes `max_level` random bits and counts the run of trailing ones.
#[derive(Debug, Clone)]
pub struct Geometric<R = StdRng> {
    rng: R,
}

impl<R: RngCore> Geometric<R> {
    pub fn new(rng: R) -> Self {
        Geometric { rng }
    }
}

impl Geometric<StdRng> {
    /// Deterministic generator for reproducible structures.
    pub fn from_seed(seed: u64) -> Self {
        Geometric::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Geometric::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> LevelGenerator for Geometric<R> {
    fn level(&mut self, max_level: usize) -> usize {
        let mask = if max_level >= 64 {
            u64::MAX
        } else {
            (1u64 << max_level) - 1
        };
        let bits = self.rng.next_u64() & mask;
        (bits.trailing_ones() as usize).min(max_level)
    }
}

/// Every level in `0..=max_level` equally likely.
#[derive(Debug, Clone)]
pub struct Uniform<R = StdRng> {
    rng: R,
}

impl<R: RngCore> Uniform<R> {
    pub fn new(rng: R) -> Self {
        Uniform { rng }
    }
}

impl Uniform<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Uniform::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> LevelGenerator for Uniform<R> {
    fn level(&mut self, max_level: usize) -> usize {
        self.rng.gen_range(0..=max_level)
    }
}

/// Always the same level, whatever `max_level` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed(pub usize);

impl LevelGenerator for Fixed {
    fn level(&mut self, _max_level: usize) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_stays_in_bounds() {
        let mut levels = Geometric::from_seed(1);
        for max_level in 0..=32 {
            for _ in 0..200 {
                assert!(levels.level(max_level) <= max_level);
            }
        }
    }

    #[test]
    fn geometric_zero_max_level() {
        let mut levels = Geometric::from_seed(2);
        for _ in 0..100 {
            assert_eq!(levels.level(0), 0);
        }
    }

    #[test]
    fn geometric_halves_per_level() {
        let mut levels = Geometric::from_seed(3);
        let samples = 100_000;
        let mut at_least = [0usize; 11];
        for _ in 0..samples {
            let level = levels.level(10);
            for k in 0..=level {
                at_least[k] += 1;
            }
        }
        assert_eq!(at_least[0], samples);
        // Expect roughly samples / 2^k; allow generous slack.
        for k in 1..5 {
            let expected = samples >> k;
            let lo = expected * 8 / 10;
            let hi = expected * 12 / 10;
            assert!(
                (lo..=hi).contains(&at_least[k]),
                "level {} reached {} times, expected about {}",
                k,
                at_least[k],
                expected
            );
        }
    }

    #[test]
    fn same_seed_same_levels() {
        let mut a = Geometric::from_seed(42);
        let mut b = Geometric::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.level(10), b.level(10));
        }
    }

    #[test]
    fn uniform_covers_range() {
        let mut levels = Uniform::from_seed(4);
        let mut seen = [false; 11];
        for _ in 0..1000 {
            seen[levels.level(10)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn fixed_ignores_bound() {
        let mut levels = Fixed(12);
        assert_eq!(levels.level(10), 12);
        let mut boxed: Box<dyn LevelGenerator> = Box::new(Fixed(3));
        assert_eq!(boxed.level(10), 3);
    }
}
