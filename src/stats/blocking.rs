//! Blocking error estimation for correlated Monte Carlo series.
//!
//! Metropolis sampling produces serially correlated energies, so the naive
//! i.i.d. variance of the mean underestimates the true uncertainty. The
//! Flyvbjerg-Petersen blocking transformation averages adjacent pairs until
//! the blocked samples decorrelate, at which point the per-level variance
//! estimates plateau.

use crate::error::{AnalysisError, Result};
use super::reductions;

/// Blocking-corrected estimate of a series mean and its variance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockingEstimate {
    /// Arithmetic mean of the original series.
    pub mean: f64,
    /// Variance of the mean at the selected blocking level.
    pub variance: f64,
    /// Standard error of the mean, sqrt of `variance`.
    pub std_error: f64,
    /// Whether a plateau was detected before the series ran out.
    pub converged: bool,
    /// Number of pair-averaging transformations behind the selected estimate.
    pub level: usize,
}

/// Estimate the mean of a correlated series and the variance of that mean.
///
/// Repeatedly halves the series by averaging adjacent pairs; an unpaired
/// trailing element is dropped, discarding at most one sample per round. At
/// each level the naive variance of the mean, s^2 / n, carries a statistical
/// uncertainty of est * sqrt(2 / (n - 1)); the selected level is the first
/// whose estimate is at or above the lower bound of every coarser level, the
/// onset of the plateau. If no level qualifies before the last one, the last
/// computable estimate is returned with `converged` set to false.
///
/// Fails on fewer than 2 samples or on any NaN/infinite sample. Pure and
/// deterministic: the same input yields bit-identical output.
pub fn block(samples: &[f64]) -> Result<BlockingEstimate> {
    if samples.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            got: samples.len(),
            min: 2,
        });
    }
    for (index, &value) in samples.iter().enumerate() {
        if !value.is_finite() {
            return Err(AnalysisError::NonFiniteInput { index, value });
        }
    }

    let mean = reductions::mean(samples);

    // (estimate, uncertainty) per blocking level, finest first.
    let mut levels: Vec<(f64, f64)> = Vec::new();
    let mut series = samples.to_vec();
    while series.len() >= 2 {
        let n = series.len() as f64;
        let estimate = reductions::variance(&series) / n;
        let uncertainty = estimate * (2.0 / (n - 1.0)).sqrt();
        levels.push((estimate, uncertainty));

        series = series
            .chunks_exact(2)
            .map(|pair| 0.5 * (pair[0] + pair[1]))
            .collect();
    }

    // Plateau onset: first level not below the lower bound of any coarser
    // level. The final level trivially satisfies this, so it only counts as
    // a fallback.
    let last = levels.len() - 1;
    for (level, &(estimate, _)) in levels[..last].iter().enumerate() {
        let floor = levels[level..]
            .iter()
            .map(|&(est, unc)| est - unc)
            .fold(f64::NEG_INFINITY, f64::max);
        if estimate >= floor {
            return Ok(BlockingEstimate {
                mean,
                variance: estimate,
                std_error: estimate.sqrt(),
                converged: true,
                level,
            });
        }
    }

    let (estimate, _) = levels[last];
    Ok(BlockingEstimate {
        mean,
        variance: estimate,
        std_error: estimate.sqrt(),
        converged: false,
        level: last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::reductions::{mean, variance};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn ar1_series(rho: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let scale = (1.0 - rho * rho).sqrt();
        let mut xs = Vec::with_capacity(n);
        let mut x = 0.0;
        for _ in 0..n {
            x = rho * x + scale * noise.sample(&mut rng);
            xs.push(x);
        }
        xs
    }

    fn iid_series(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 1.0).unwrap();
        (0..n).map(|_| noise.sample(&mut rng)).collect()
    }

    #[test]
    fn test_constant_series() {
        let est = block(&[1.0; 8]).unwrap();
        assert_relative_eq!(est.mean, 1.0, epsilon = 1e-15);
        assert_relative_eq!(est.variance, 0.0, epsilon = 1e-15);
        assert!(est.converged);
        assert_eq!(est.level, 0);
    }

    #[test]
    fn test_ramp_matches_naive_estimate() {
        // 1..=8 plateaus at the first level: sample variance 6.0 over 8 points.
        let xs: Vec<f64> = (1..=8).map(|i| i as f64).collect();
        let est = block(&xs).unwrap();
        assert_relative_eq!(est.mean, 4.5, epsilon = 1e-12);
        assert_relative_eq!(est.variance, variance(&xs) / 8.0, epsilon = 1e-12);
        assert_relative_eq!(est.variance, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_samples() {
        assert!(matches!(
            block(&[]),
            Err(AnalysisError::InsufficientData { got: 0, min: 2 })
        ));
        assert!(matches!(
            block(&[1.0]),
            Err(AnalysisError::InsufficientData { got: 1, min: 2 })
        ));
    }

    #[test]
    fn test_non_finite_samples() {
        assert!(matches!(
            block(&[1.0, f64::NAN, 2.0]),
            Err(AnalysisError::NonFiniteInput { index: 1, .. })
        ));
        assert!(matches!(
            block(&[1.0, 2.0, f64::INFINITY]),
            Err(AnalysisError::NonFiniteInput { index: 2, .. })
        ));
    }

    #[test]
    fn test_two_samples_is_fallback() {
        // A single level leaves nothing to compare against.
        let est = block(&[0.0, 1.0]).unwrap();
        assert!(!est.converged);
        assert_eq!(est.level, 0);
        assert!(est.variance >= 0.0);
    }

    #[test]
    fn test_deterministic_bitwise() {
        let xs = ar1_series(0.8, 512, 7);
        let a = block(&xs).unwrap();
        let b = block(&xs).unwrap();
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.variance.to_bits(), b.variance.to_bits());
        assert_eq!(a.level, b.level);
    }

    #[test]
    fn test_variance_nonnegative() {
        for (i, xs) in [
            ar1_series(0.9, 1024, 1),
            iid_series(1024, 2),
            (1..=31).map(|i| (i as f64).sin()).collect(),
        ]
        .iter()
        .enumerate()
        {
            let est = block(xs).unwrap_or_else(|e| panic!("fixture {}: {}", i, e));
            assert!(est.variance >= 0.0);
            assert!(est.std_error >= 0.0);
        }
    }

    #[test]
    fn test_shuffle_keeps_mean_but_not_variance() {
        // Shuffling destroys the autocorrelation a correlated fixture carries,
        // so the corrected variance must drop while the mean stays put.
        let xs = ar1_series(0.9, 1024, 3);
        let mut shuffled = xs.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(4));

        let original = block(&xs).unwrap();
        let permuted = block(&shuffled).unwrap();

        assert_relative_eq!(original.mean, permuted.mean, epsilon = 1e-9);
        assert!(
            permuted.variance < original.variance / 2.0,
            "shuffled {} vs original {}",
            permuted.variance,
            original.variance
        );
    }

    #[test]
    fn test_adjacent_swap_invariance_iid() {
        // Swapping within the pairs the first transformation averages leaves
        // every blocked level essentially unchanged.
        let xs = iid_series(1024, 5);
        let mut swapped = xs.clone();
        for pair in swapped.chunks_exact_mut(2) {
            pair.swap(0, 1);
        }

        let a = block(&xs).unwrap();
        let b = block(&swapped).unwrap();
        assert_relative_eq!(a.mean, b.mean, epsilon = 1e-12);
        assert_relative_eq!(a.variance, b.variance, max_relative = 0.1);
    }

    #[test]
    fn test_ar1_inflation_factor() {
        // For AR(1) noise the true variance of the mean exceeds the naive
        // estimate by (1 + rho) / (1 - rho); with rho = 0.5 that is 3. The
        // plateau estimate is itself statistical, so the tolerance is a
        // factor of two around the theoretical inflation.
        let rho = 0.5;
        let xs = ar1_series(rho, 1024, 11);
        let est = block(&xs).unwrap();

        let naive = variance(&xs) / xs.len() as f64;
        let ratio = est.variance / naive;
        let theory = (1.0 + rho) / (1.0 - rho);
        assert!(
            ratio > theory / 2.0 && ratio < theory * 2.0,
            "inflation {} outside [{}, {}]",
            ratio,
            theory / 2.0,
            theory * 2.0
        );
        assert_relative_eq!(est.mean, mean(&xs), epsilon = 1e-12);
    }
}
