use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source for glitch trials and durations
pub trait GlitchDice: Send {
    /// Uniform sample in `[0, 1)`
    fn sample(&mut self) -> f64;

    /// Uniform duration in `[min, max)`; `min` when the range is empty
    fn duration(&mut self, min: Duration, max: Duration) -> Duration;
}

/// [`GlitchDice`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomDice<R> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> GlitchDice for RandomDice<R> {
    fn sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn duration(&mut self, min: Duration, max: Duration) -> Duration {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_in_unit_interval() {
        let mut dice = RandomDice::seeded(7);
        for _ in 0..10_000 {
            let s = dice.sample();
            assert!((0.0..1.0).contains(&s));
        }
    }

    #[test]
    fn test_durations_in_half_open_range() {
        let mut dice = RandomDice::seeded(42);
        let min = Duration::from_millis(150);
        let max = Duration::from_millis(350);
        for _ in 0..10_000 {
            let d = dice.duration(min, max);
            assert!(d >= min && d < max, "{d:?} out of range");
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut dice = RandomDice::seeded(1);
        let d = Duration::from_millis(200);
        assert_eq!(dice.duration(d, d), d);
    }

    #[test]
    fn test_seeded_dice_repeat() {
        let mut a = RandomDice::seeded(99);
        let mut b = RandomDice::seeded(99);
        for _ in 0..32 {
            assert_eq!(a.sample(), b.sample());
        }
    }
}
