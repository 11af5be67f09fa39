//! Narration of a comparison run
//!
//! The pipeline reports every decision to a [`ComparisonReporter`]. The
//! default [`NullReporter`] discards everything; [`TracingReporter`] writes a
//! human-readable account at `info` level.
//!
//! # Example
//!
//! ```rust,ignore
//! use compare_polars::{CompareConfig, GroupComparator, TracingReporter};
//!
//! let comparator = GroupComparator::new(CompareConfig::default())
//!     .with_reporter(TracingReporter);
//! let report = comparator.compare(&df, "group", &["latency"])?;
//! ```

use crate::family::{FamilyDecision, FamilyReason};
use crate::matrix::PairMatrix;
use crate::result::{GroupSummary, OmnibusTest};
use compare_core::PValueBound;
use compare_effect::EffectSize;
use compare_tests::TestOutcome;
use tracing::info;

/// Receives the steps of each metric's comparison as they happen
pub trait ComparisonReporter: Send + Sync {
    /// A metric was partitioned into groups
    fn metric_started(&self, metric: &str, groups: &[GroupSummary]);

    /// The test family was chosen
    fn family_selected(&self, metric: &str, decision: &FamilyDecision);

    /// The omnibus test ran
    fn omnibus_completed(
        &self,
        metric: &str,
        test: OmnibusTest,
        outcome: &TestOutcome,
        significant: bool,
    );

    /// A significant two-group result with its effect size
    fn two_sample_completed(
        &self,
        metric: &str,
        pvalue: f64,
        bound: &PValueBound,
        effect: &EffectSize,
    );

    /// Posthoc matrices of a significant multi-group result
    fn posthoc_completed(
        &self,
        metric: &str,
        corrected: &PairMatrix<f64>,
        bounds: &PairMatrix<PValueBound>,
        effects: &PairMatrix<f64>,
    );
}

/// Reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ComparisonReporter for NullReporter {
    #[inline(always)]
    fn metric_started(&self, _metric: &str, _groups: &[GroupSummary]) {}

    #[inline(always)]
    fn family_selected(&self, _metric: &str, _decision: &FamilyDecision) {}

    #[inline(always)]
    fn omnibus_completed(
        &self,
        _metric: &str,
        _test: OmnibusTest,
        _outcome: &TestOutcome,
        _significant: bool,
    ) {
    }

    #[inline(always)]
    fn two_sample_completed(
        &self,
        _metric: &str,
        _pvalue: f64,
        _bound: &PValueBound,
        _effect: &EffectSize,
    ) {
    }

    #[inline(always)]
    fn posthoc_completed(
        &self,
        _metric: &str,
        _corrected: &PairMatrix<f64>,
        _bounds: &PairMatrix<PValueBound>,
        _effects: &PairMatrix<f64>,
    ) {
    }
}

/// Reporter that narrates through `tracing` at `info` level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ComparisonReporter for TracingReporter {
    fn metric_started(&self, metric: &str, groups: &[GroupSummary]) {
        info!(metric, "Testing metric {metric}");
        for (i, group) in groups.iter().enumerate() {
            info!(metric, "Sample {}: {} - n. {}", i + 1, group.label, group.size);
        }
    }

    fn family_selected(&self, metric: &str, decision: &FamilyDecision) {
        match &decision.reason {
            FamilyReason::NonNormal { group, pvalue } => info!(
                metric,
                "Non normal samples: using non parametric tests (group {group}, p = {pvalue:.3e})"
            ),
            FamilyReason::UnequalVariance { pvalue } => info!(
                metric,
                "Non equal variances: using non parametric tests (p = {pvalue:.3e})"
            ),
            FamilyReason::ManyGroups { groups } => info!(
                metric,
                "Population test: {groups} groups, using non parametric tests"
            ),
            FamilyReason::DiagnosticsPassed => {
                info!(metric, "Normal samples with equal variances: using parametric tests")
            }
        }
    }

    fn omnibus_completed(
        &self,
        metric: &str,
        test: OmnibusTest,
        outcome: &TestOutcome,
        significant: bool,
    ) {
        info!(
            metric,
            "{test}: statistic {:.4}, p-value {:.3e}",
            outcome.statistic,
            outcome.pvalue
        );
        if !significant {
            info!(metric, "Non significant");
        }
    }

    fn two_sample_completed(
        &self,
        metric: &str,
        pvalue: f64,
        bound: &PValueBound,
        effect: &EffectSize,
    ) {
        info!(
            metric,
            "P-value {bound} ({pvalue:.3e}) - effect size: {:.3} ({})",
            effect.magnitude,
            effect.interpretation
        );
    }

    fn posthoc_completed(
        &self,
        metric: &str,
        corrected: &PairMatrix<f64>,
        bounds: &PairMatrix<PValueBound>,
        effects: &PairMatrix<f64>,
    ) {
        info!(metric, "Post-hoc: {} significant pairs", bounds.count());
        let labels = corrected.labels();
        for row in 0..labels.len() {
            for col in 0..row {
                let Some(p) = corrected.get(row, col) else {
                    continue;
                };
                let (r, c) = (&labels[row], &labels[col]);
                match (bounds.get(row, col), effects.get(row, col)) {
                    (Some(bound), Some(d)) => info!(
                        metric,
                        "{r} vs {c}: p-value {bound} ({p:.3e}) - Cohen's d: {d:.3}"
                    ),
                    _ => info!(metric, "{r} vs {c}: p-value {p:.3e} - non significant"),
                }
            }
        }
    }
}

impl<R: ComparisonReporter + ?Sized> ComparisonReporter for &R {
    fn metric_started(&self, metric: &str, groups: &[GroupSummary]) {
        (**self).metric_started(metric, groups)
    }

    fn family_selected(&self, metric: &str, decision: &FamilyDecision) {
        (**self).family_selected(metric, decision)
    }

    fn omnibus_completed(
        &self,
        metric: &str,
        test: OmnibusTest,
        outcome: &TestOutcome,
        significant: bool,
    ) {
        (**self).omnibus_completed(metric, test, outcome, significant)
    }

    fn two_sample_completed(
        &self,
        metric: &str,
        pvalue: f64,
        bound: &PValueBound,
        effect: &EffectSize,
    ) {
        (**self).two_sample_completed(metric, pvalue, bound, effect)
    }

    fn posthoc_completed(
        &self,
        metric: &str,
        corrected: &PairMatrix<f64>,
        bounds: &PairMatrix<PValueBound>,
        effects: &PairMatrix<f64>,
    ) {
        (**self).posthoc_completed(metric, corrected, bounds, effects)
    }
}
