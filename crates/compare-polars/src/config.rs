//! Configuration of a group comparison run

use crate::{Error, Result};
use compare_tests::Correction;
use serde::{Deserialize, Serialize};

/// Default significance level for every decision of the pipeline
pub const DEFAULT_SIGNIFICANCE: f64 = 0.01;

/// Settings shared by every metric of a comparison
///
/// The same `significance` gates the normality and variance diagnostics, the
/// omnibus test and the posthoc filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Significance level, strictly between 0 and 1
    pub significance: f64,
    /// Narrate each step through the tracing reporter
    pub verbose: bool,
    /// Multiple-comparison correction for posthoc p-values
    pub correction: Correction,
    /// Always use rank-based tests when there are more than two groups
    pub rank_tests_for_many_groups: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            significance: DEFAULT_SIGNIFICANCE,
            verbose: false,
            correction: Correction::Holm,
            rank_tests_for_many_groups: true,
        }
    }
}

impl CompareConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    /// When disabled, groups of three or more follow the diagnostics and may
    /// use ANOVA with pairwise t-tests
    pub fn with_rank_tests_for_many_groups(mut self, enabled: bool) -> Self {
        self.rank_tests_for_many_groups = enabled;
        self
    }

    /// Check that the significance level lies in (0, 1)
    pub fn validate(&self) -> Result<()> {
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(Error::InvalidConfiguration(format!(
                "significance level {} must be in (0, 1)",
                self.significance
            )));
        }
        Ok(())
    }
}
