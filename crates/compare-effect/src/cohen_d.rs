//! Cohen's d effect size
//!
//! Cohen's d is a standardized effect size measure that expresses the difference
//! between two group means in terms of the pooled standard deviation.

use crate::{EffectSize, EffectSizeEstimator};
use compare_core::{ensure_finite, ensure_len, sample, Error, Result};
use tracing::debug;

/// Cohen's d effect size estimator
///
/// The pooled form is calculated as:
/// d = (x̄ - ȳ) / sqrt(((nx - 1)·s²x + (ny - 1)·s²y) / (nx + ny - 2))
///
/// where s² is the Bessel-corrected sample variance. A pooled variance of
/// exactly zero (both samples constant) is reported as
/// [`Error::DegenerateSample`] instead of an infinite or NaN effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct CohenD;

impl CohenD {
    /// Create a new Cohen's d estimator
    pub fn new() -> Self {
        Self
    }

    fn compute(&self, group1: &[f64], group2: &[f64]) -> Result<EffectSize> {
        ensure_len(group1, 2)?;
        ensure_len(group2, 2)?;
        ensure_finite(group1, "first sample")?;
        ensure_finite(group2, "second sample")?;

        let mean1 = sample::mean(group1)?;
        let mean2 = sample::mean(group2)?;
        debug!(mean1, mean2, "Cohen's d group means");

        let n1 = group1.len() as f64;
        let n2 = group2.len() as f64;
        let pooled_variance = ((n1 - 1.0) * sample::variance(group1)?
            + (n2 - 1.0) * sample::variance(group2)?)
            / (n1 + n2 - 2.0);

        if pooled_variance <= 0.0 {
            return Err(Error::DegenerateSample(
                "pooled variance is zero, Cohen's d is undefined".to_string(),
            ));
        }

        let d = (mean1 - mean2) / pooled_variance.sqrt();
        Ok(EffectSize::new(d, (group1.len(), group2.len())))
    }
}

impl EffectSizeEstimator for CohenD {
    fn estimate(&self, group1: &[f64], group2: &[f64]) -> Result<EffectSize> {
        self.compute(group1, group2)
    }

    fn name(&self) -> &str {
        "Cohen's d"
    }
}

/// Signed Cohen's d between `x` and `y` (positive when `x` has the larger mean)
pub fn cohen_d(x: &[f64], y: &[f64]) -> Result<f64> {
    CohenD::new().estimate(x, y).map(|effect| effect.magnitude)
}
