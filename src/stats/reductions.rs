//! Scalar reductions over sample series.
//!
//! The simulator's own output mixes population and sample variances, so both
//! denominators are exposed under separate names rather than a flag. All
//! uncertainty reporting in this crate uses the sample (n-1) estimator;
//! `variance_population` exists for summarizing columns the simulator already
//! reduced with the n denominator.

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample variance (n-1 denominator). NaN for fewer than 2 samples.
pub fn variance(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(samples);
    samples.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Population variance (n denominator). NaN for an empty slice.
pub fn variance_population(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n == 0 {
        return f64::NAN;
    }
    let m = mean(samples);
    samples.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n as f64
}

/// Sample standard deviation.
pub fn std_dev(samples: &[f64]) -> f64 {
    variance(samples).sqrt()
}

/// Naive i.i.d. standard error of the mean, sqrt(s^2 / n).
///
/// Underestimates the true uncertainty for autocorrelated series; use
/// [`super::block`] for Metropolis output.
pub fn standard_error(samples: &[f64]) -> f64 {
    (variance(samples) / samples.len() as f64).sqrt()
}
