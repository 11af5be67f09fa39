//! Core trait for effect size estimation

use crate::types::EffectSize;
use compare_core::Result;

/// Effect size estimator between two independent samples
pub trait EffectSizeEstimator {
    /// Compute the effect size of `group1` relative to `group2`
    fn estimate(&self, group1: &[f64], group2: &[f64]) -> Result<EffectSize>;

    /// Human-readable name used in reports
    fn name(&self) -> &str;

    /// Check if the estimator is antisymmetric (effect_size(A,B) = -effect_size(B,A))
    fn is_symmetric(&self) -> bool {
        true
    }
}
