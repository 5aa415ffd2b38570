//// # Empirical statistics
////
//// Summaries of values drawn from a distribution, to be compared against
//// the analytic results.

use crate::distribution::Histogram;
use crate::errors::{PertError, Result};
use std::collections::BTreeMap;

fn check_not_empty(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        Err(PertError::domain("sample size", 0.0))
    } else {
        Ok(())
    }
}

/// Mean and (population) variance.
pub fn sample_moments(values: &[f64]) -> Result<(f64, f64)> {
    check_not_empty(values)?;
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Ok((mean, var))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quartiles {
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    /// The quantile at the requested confidence level
    pub q_conf: f64,
}

/// Sample quantiles, taking the sorted value at rank `round(p * n)`.
pub fn sample_quartiles(values: &[f64], confidence: f64) -> Result<Quartiles> {
    check_not_empty(values)?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(PertError::domain("confidence", confidence));
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let n = sorted.len();
    let at = |p: f64| sorted[((p * n as f64 + 0.5).floor() as usize).min(n - 1)];
    Ok(Quartiles {
        q25: at(0.25),
        q50: at(0.50),
        q75: at(0.75),
        q_conf: at(confidence),
    })
}

/// Counts the values falling on each integer unit (rounding half up).
pub fn bucketize(values: &[f64]) -> BTreeMap<i64, usize> {
    let mut buckets = BTreeMap::new();
    for v in values {
        *buckets.entry((v + 0.5).floor() as i64).or_insert(0) += 1;
    }
    buckets
}

impl Histogram {
    /// Histogram of counted units, e.g. the output of [`bucketize`].
    pub fn from_counts(counts: &BTreeMap<i64, usize>, max_dots: usize) -> Self {
        let total: usize = counts.values().sum();
        let probabilities = counts
            .iter()
            .map(|(&unit, &count)| (unit, count as f64 / total as f64))
            .collect();
        Self::from_probabilities(probabilities, max_dots)
    }
}
