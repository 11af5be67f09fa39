//! Choosing between the parametric and rank-based test families
//!
//! The diagnostics run as a chain of stages folded into one
//! [`FamilyDecision`]. A stage runs only while the decision is still
//! parametric, so the first stage to object is the recorded reason.

use crate::partition::GroupedSamples;
use crate::reporter::ComparisonReporter;
use crate::{CompareConfig, Error, Result};
use compare_tests::HypothesisTests;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// What forced the rank-based family, or that nothing did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FamilyReason {
    /// Every diagnostic passed
    DiagnosticsPassed,
    /// A group failed the normality test
    NonNormal { group: String, pvalue: f64 },
    /// The groups failed the equal-variance test
    UnequalVariance { pvalue: f64 },
    /// More than two groups are always compared with rank tests
    ManyGroups { groups: usize },
}

impl fmt::Display for FamilyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiagnosticsPassed => write!(f, "normal samples with equal variances"),
            Self::NonNormal { group, pvalue } => {
                write!(f, "group '{group}' is not normal (p = {pvalue:.3e})")
            }
            Self::UnequalVariance { pvalue } => {
                write!(f, "variances are not equal (p = {pvalue:.3e})")
            }
            Self::ManyGroups { groups } => write!(f, "{groups} groups use rank tests"),
        }
    }
}

/// Test family chosen for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyDecision {
    pub needs_nonparametric: bool,
    pub reason: FamilyReason,
}

impl FamilyDecision {
    pub fn parametric() -> Self {
        Self {
            needs_nonparametric: false,
            reason: FamilyReason::DiagnosticsPassed,
        }
    }

    pub fn nonparametric(reason: FamilyReason) -> Self {
        Self {
            needs_nonparametric: true,
            reason,
        }
    }

    /// Run `stage` unless the family is already rank-based
    fn then<F>(self, stage: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Option<FamilyReason>>,
    {
        if self.needs_nonparametric {
            return Ok(self);
        }
        Ok(match stage()? {
            Some(reason) => Self::nonparametric(reason),
            None => self,
        })
    }
}

/// Fold normality, equal-variance and group-count checks into a decision
pub(crate) fn decide<T, R>(
    tests: &T,
    reporter: &R,
    samples: &GroupedSamples,
    config: &CompareConfig,
) -> Result<FamilyDecision>
where
    T: HypothesisTests + ?Sized,
    R: ComparisonReporter + ?Sized,
{
    let metric = samples.metric();
    let alpha = config.significance;

    let decision = FamilyDecision::parametric()
        .then(|| {
            for (label, sample) in samples.labels().iter().zip(samples.samples()) {
                let outcome = tests
                    .normality(sample)
                    .map_err(|e| Error::from_test(metric, label, "normality test", e))?;
                debug!(metric, group = %label, pvalue = outcome.pvalue, "normality");
                if outcome.rejects(alpha) {
                    return Ok(Some(FamilyReason::NonNormal {
                        group: label.clone(),
                        pvalue: outcome.pvalue,
                    }));
                }
            }
            Ok(None)
        })?
        .then(|| {
            let outcome = tests
                .equal_variance(&samples.slices())
                .map_err(|e| Error::from_test(metric, &samples.scope(), "equal variance test", e))?;
            debug!(metric, pvalue = outcome.pvalue, "equal variance");
            Ok(outcome.rejects(alpha).then(|| FamilyReason::UnequalVariance {
                pvalue: outcome.pvalue,
            }))
        })?
        .then(|| {
            let k = samples.len();
            Ok((k > 2 && config.rank_tests_for_many_groups)
                .then_some(FamilyReason::ManyGroups { groups: k }))
        })?;

    reporter.family_selected(metric, &decision);
    Ok(decision)
}
