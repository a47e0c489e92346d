//! Choice sources for the fill step.
//!
//! Generation draws two kinds of decisions: whether to fill a cell, and
//! which element of a candidate set to take. Abstracting them lets
//! callers plug in a seeded RNG or a fixed script.

use rand::Rng;

/// Supplies fill and selection decisions.
pub trait ChoiceSource {
    /// Whether to fill a cell. Random sources fill when a uniform draw
    /// in [0, 1) exceeds `threshold`.
    fn should_fill(&mut self, threshold: f64) -> bool;

    /// Index into a candidate set of length `len` (`len > 0`).
    fn pick(&mut self, len: usize) -> usize;
}

/// Adapts any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RandomSource<R> {
    rng: R,
}

impl<R: Rng> RandomSource<R> {
    /// Wraps an RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ChoiceSource for RandomSource<R> {
    fn should_fill(&mut self, threshold: f64) -> bool {
        self.rng.random::<f64>() > threshold
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Always fills and always takes the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl ChoiceSource for FirstChoice {
    fn should_fill(&mut self, _threshold: f64) -> bool {
        true
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Never fills.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFill;

impl ChoiceSource for NeverFill {
    fn should_fill(&mut self, _threshold: f64) -> bool {
        false
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_pick_in_range() {
        let mut source = RandomSource::new(StdRng::seed_from_u64(42));
        for len in 1..20 {
            assert!(source.pick(len) < len);
        }
    }

    #[test]
    fn test_threshold_extremes() {
        let mut source = RandomSource::new(StdRng::seed_from_u64(7));
        // draws are in [0, 1): never above 1.0
        assert!((0..100).all(|_| !source.should_fill(1.0)));
    }

    #[test]
    fn test_fill_rate_near_seventy_percent() {
        let mut source = RandomSource::new(StdRng::seed_from_u64(1));
        let filled = (0..10_000).filter(|_| source.should_fill(0.3)).count();
        assert!((6_500..7_500).contains(&filled), "filled {filled}");
    }

    #[test]
    fn test_fixed_sources() {
        assert!(FirstChoice.should_fill(0.99));
        assert_eq!(FirstChoice.pick(5), 0);
        assert!(!NeverFill.should_fill(0.0));
    }
}
