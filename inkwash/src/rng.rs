//! Random sampling utilities.
//!
//! Wraps a `rand` generator with the two distributions the generator needs:
//! a uniform draw over a range and an approximately normal draw using the
//! polar (Marsaglia) form of Box-Muller.
//!
//! # Example
//! ```
//! use inkwash::rng::Sampler;
//!
//! let mut sampler = Sampler::seeded(12345);
//! let u = sampler.uniform(-15.0, 15.0);
//! let g = sampler.gaussian(0.0, 1.0);
//! assert!((-15.0..=15.0).contains(&u));
//! assert!(g.is_finite());
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform and gaussian sampling over any `rand` generator.
#[derive(Clone, Debug)]
pub struct Sampler<R = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    /// Create a sampler whose sequence is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Create a sampler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Get a random f64 in the range [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Get a random f64 in the range [-1, 1).
    #[inline]
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Uniform value in the inclusive range `[min, max]`.
    ///
    /// Never panics: with `min > max` the draw lands in `(max, min]`
    /// instead, and `min == max` always returns `min`.
    #[inline]
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if min < max && (max - min).is_finite() {
            self.rng.random_range(min..=max)
        } else {
            min + self.next_f64() * (max - min)
        }
    }

    /// Approximately normal sample with the given mean and standard
    /// deviation.
    ///
    /// Each call runs its own rejection loop; the paired second sample the
    /// polar method yields is discarded.
    pub fn gaussian(&mut self, mean: f64, sd: f64) -> f64 {
        loop {
            let x1 = self.next_signed();
            let x2 = self.next_signed();
            let w = x1 * x1 + x2 * x2;

            if w > 0.0 && w < 1.0 {
                let scale = (-2.0 * w.ln() / w).sqrt();
                return x1 * scale * sd + mean;
            }
        }
    }

    /// Standard normal sample.
    #[inline]
    pub fn standard_normal(&mut self) -> f64 {
        self.gaussian(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_and_sd(samples: &[f64]) -> (f64, f64) {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn deterministic() {
        let mut a = Sampler::seeded(42);
        let mut b = Sampler::seeded(42);

        for _ in 0..100 {
            assert_eq!(a.gaussian(0.0, 1.0), b.gaussian(0.0, 1.0));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = Sampler::seeded(1);
        let mut b = Sampler::seeded(2);

        let vals1: Vec<_> = (0..10).map(|_| a.next_f64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| b.next_f64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn uniform_in_range() {
        let mut sampler = Sampler::seeded(12345);
        for _ in 0..1000 {
            let v = sampler.uniform(10.0, 20.0);
            assert!((10.0..=20.0).contains(&v), "{} outside [10, 20]", v);
        }
    }

    #[test]
    fn uniform_covers_the_whole_range() {
        let mut sampler = Sampler::seeded(31);
        let draws: Vec<f64> = (0..10_000).map(|_| sampler.uniform(-15.0, 15.0)).collect();
        let lo = draws.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = draws.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        assert!(lo >= -15.0 && hi <= 15.0);
        assert!(lo < -14.9 && hi > 14.9, "range [{}, {}] too narrow", lo, hi);
    }

    #[test]
    fn uniform_degenerate_range() {
        let mut sampler = Sampler::seeded(7);
        for _ in 0..100 {
            assert_eq!(sampler.uniform(3.5, 3.5), 3.5);
        }
    }

    #[test]
    fn uniform_inverted_range_does_not_panic() {
        let mut sampler = Sampler::seeded(7);
        for _ in 0..1000 {
            let v = sampler.uniform(20.0, 15.0);
            assert!(v > 15.0 && v <= 20.0, "{} outside (15, 20]", v);
        }
    }

    #[test]
    fn gaussian_standard_moments() {
        let mut sampler = Sampler::seeded(2024);
        let samples: Vec<f64> = (0..20_000).map(|_| sampler.standard_normal()).collect();
        let (mean, sd) = mean_and_sd(&samples);

        assert!(mean.abs() < 0.05, "mean was {}", mean);
        assert!((sd - 1.0).abs() < 0.05, "sd was {}", sd);
    }

    #[test]
    fn gaussian_scaled_and_shifted() {
        let mut sampler = Sampler::seeded(99);
        let samples: Vec<f64> = (0..20_000).map(|_| sampler.gaussian(5.0, 2.0)).collect();
        let (mean, sd) = mean_and_sd(&samples);

        assert!((mean - 5.0).abs() < 0.1, "mean was {}", mean);
        assert!((sd - 2.0).abs() < 0.1, "sd was {}", sd);
    }

    #[test]
    fn gaussian_zero_sd_is_mean() {
        let mut sampler = Sampler::seeded(5);
        for _ in 0..100 {
            assert_eq!(sampler.gaussian(1.5, 0.0), 1.5);
        }
    }
}
