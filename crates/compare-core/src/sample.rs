//! Descriptive statistics on raw samples
//!
//! Small building blocks shared by the effect-size and hypothesis-test
//! crates. All functions operate on plain `f64` slices and assume the caller
//! has already rejected non-finite values.

use crate::{ensure_len, Error, Result};
use std::cmp::Ordering;

/// Arithmetic mean
pub fn mean(sample: &[f64]) -> Result<f64> {
    ensure_len(sample, 1)?;
    Ok(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Sum of squared deviations about the mean
pub fn sum_squared_deviations(sample: &[f64]) -> Result<f64> {
    let m = mean(sample)?;
    Ok(sample.iter().map(|&x| (x - m).powi(2)).sum())
}

/// Sample variance with Bessel's correction (divides by `n - 1`)
pub fn variance(sample: &[f64]) -> Result<f64> {
    ensure_len(sample, 2)?;
    Ok(sum_squared_deviations(sample)? / (sample.len() - 1) as f64)
}

/// Median (average of the two middle values for even lengths)
pub fn median(sample: &[f64]) -> Result<f64> {
    ensure_len(sample, 1)?;
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Ok(sorted[n / 2])
    }
}

/// Ranks of several samples pooled together
#[derive(Debug, Clone, PartialEq)]
pub struct PooledRanks {
    /// Average ranks (1-based), split back per input sample
    pub ranks: Vec<Vec<f64>>,
    /// `Σ (t³ - t)` over every group of tied values
    pub tie_sum: f64,
    /// Total number of observations
    pub total: usize,
}

impl PooledRanks {
    /// Mean rank of sample `i`
    pub fn mean_rank(&self, i: usize) -> f64 {
        let r = &self.ranks[i];
        r.iter().sum::<f64>() / r.len() as f64
    }

    /// Sum of ranks of sample `i`
    pub fn rank_sum(&self, i: usize) -> f64 {
        self.ranks[i].iter().sum()
    }

    /// Tie correction factor `1 - Σ(t³ - t) / (N³ - N)`
    pub fn tie_correction(&self) -> f64 {
        let n = self.total as f64;
        if self.total < 2 {
            return 1.0;
        }
        1.0 - self.tie_sum / (n * n * n - n)
    }

    /// Whether any two pooled observations share a value
    pub fn has_ties(&self) -> bool {
        self.tie_sum > 0.0
    }
}

/// Rank the pooled observations of `samples`, averaging ranks over ties
pub fn pooled_ranks(samples: &[&[f64]]) -> Result<PooledRanks> {
    let total: usize = samples.iter().map(|s| s.len()).sum();
    if total == 0 {
        return Err(Error::too_small(1, 0));
    }

    let mut pooled: Vec<(f64, usize, usize)> = Vec::with_capacity(total);
    for (g, sample) in samples.iter().enumerate() {
        for (i, &v) in sample.iter().enumerate() {
            pooled.push((v, g, i));
        }
    }
    pooled.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut ranks: Vec<Vec<f64>> = samples.iter().map(|s| vec![0.0; s.len()]).collect();
    let mut tie_sum = 0.0;
    let mut start = 0;
    while start < total {
        let mut end = start + 1;
        while end < total && pooled[end].0 == pooled[start].0 {
            end += 1;
        }
        // Positions start..end are tied; 1-based average rank
        let avg = (start + 1 + end) as f64 / 2.0;
        for &(_, g, i) in &pooled[start..end] {
            ranks[g][i] = avg;
        }
        let t = (end - start) as f64;
        tie_sum += t * t * t - t;
        start = end;
    }

    Ok(PooledRanks { ranks, tie_sum, total })
}
