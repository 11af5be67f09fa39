//! Extension trait for group comparisons on Polars DataFrames

use crate::orchestrator::{self, IsolatedResults};
use crate::partition::GroupIndex;
use crate::{CompareConfig, ComparisonReport, Result};
use polars::prelude::*;

/// Group comparison operations on a DataFrame
pub trait GroupComparisonExt {
    /// Compare each metric column across the groups of `group_column`
    ///
    /// # Arguments
    /// * `group_column` - Categorical column defining the groups
    /// * `metrics` - Numeric columns to test for differences
    /// * `config` - Significance level, correction and narration settings
    ///
    /// # Returns
    /// One result per metric, in the order requested
    fn compare_groups(
        &self,
        group_column: &str,
        metrics: &[&str],
        config: &CompareConfig,
    ) -> Result<ComparisonReport>;

    /// Like [`compare_groups`](Self::compare_groups) but a failing metric
    /// does not abort the others
    fn compare_groups_isolated(
        &self,
        group_column: &str,
        metrics: &[&str],
        config: &CompareConfig,
    ) -> Result<IsolatedResults>;

    /// Group labels of `group_column` in comparison order
    fn group_labels(&self, group_column: &str) -> Result<Vec<String>>;
}

impl GroupComparisonExt for DataFrame {
    fn compare_groups(
        &self,
        group_column: &str,
        metrics: &[&str],
        config: &CompareConfig,
    ) -> Result<ComparisonReport> {
        orchestrator::compare_groups(self, group_column, metrics, config)
    }

    fn compare_groups_isolated(
        &self,
        group_column: &str,
        metrics: &[&str],
        config: &CompareConfig,
    ) -> Result<IsolatedResults> {
        orchestrator::compare_groups_isolated(self, group_column, metrics, config)
    }

    fn group_labels(&self, group_column: &str) -> Result<Vec<String>> {
        Ok(GroupIndex::new(self, group_column)?.labels().to_vec())
    }
}
