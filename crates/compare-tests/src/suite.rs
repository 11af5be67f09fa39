//! The set of hypothesis tests consumed by the group comparison pipeline

use crate::correction::Correction;
use crate::types::{SymmetricMatrix, TestOutcome};
use crate::{normality, omnibus, posthoc, two_sample, variance};
use compare_core::Result;

/// Statistical tests a comparison pipeline selects between
///
/// Samples are passed in group order; matrices returned by the posthoc
/// methods are indexed by that same position.
pub trait HypothesisTests: Send + Sync {
    /// Normality test on a single sample
    fn normality(&self, sample: &[f64]) -> Result<TestOutcome>;

    /// Equality-of-variance test across groups
    fn equal_variance(&self, groups: &[&[f64]]) -> Result<TestOutcome>;

    /// Rank-based k-sample omnibus test
    fn rank_omnibus(&self, groups: &[&[f64]]) -> Result<TestOutcome>;

    /// Parametric k-sample omnibus test on means
    fn variance_omnibus(&self, groups: &[&[f64]]) -> Result<TestOutcome>;

    /// Rank-based two-sample test
    fn rank_two_sample(&self, x: &[f64], y: &[f64]) -> Result<TestOutcome>;

    /// Parametric two-sample test on means
    fn t_two_sample(&self, x: &[f64], y: &[f64]) -> Result<TestOutcome>;

    /// Rank-based pairwise comparisons with corrected p-values
    fn rank_posthoc(&self, groups: &[&[f64]], correction: Correction) -> Result<SymmetricMatrix>;

    /// Parametric pairwise comparisons with corrected p-values
    fn t_posthoc(&self, groups: &[&[f64]], correction: Correction) -> Result<SymmetricMatrix>;
}

/// Shapiro-Wilk, Levene, Kruskal-Wallis / ANOVA, Mann-Whitney U / Student t,
/// Conover / pairwise t
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicTests;

impl HypothesisTests for ClassicTests {
    fn normality(&self, sample: &[f64]) -> Result<TestOutcome> {
        normality::shapiro_wilk(sample)
    }

    fn equal_variance(&self, groups: &[&[f64]]) -> Result<TestOutcome> {
        variance::levene(groups)
    }

    fn rank_omnibus(&self, groups: &[&[f64]]) -> Result<TestOutcome> {
        omnibus::kruskal_wallis(groups)
    }

    fn variance_omnibus(&self, groups: &[&[f64]]) -> Result<TestOutcome> {
        omnibus::one_way_anova(groups)
    }

    fn rank_two_sample(&self, x: &[f64], y: &[f64]) -> Result<TestOutcome> {
        two_sample::mann_whitney_u(x, y)
    }

    fn t_two_sample(&self, x: &[f64], y: &[f64]) -> Result<TestOutcome> {
        two_sample::student_t(x, y)
    }

    fn rank_posthoc(&self, groups: &[&[f64]], correction: Correction) -> Result<SymmetricMatrix> {
        posthoc::conover(groups, correction)
    }

    fn t_posthoc(&self, groups: &[&[f64]], correction: Correction) -> Result<SymmetricMatrix> {
        posthoc::pairwise_t(groups, correction)
    }
}
