//! Per-metric comparison results

use crate::family::FamilyDecision;
use crate::matrix::PairMatrix;
use crate::Result;
use compare_core::PValueBound;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;

/// Label and number of observations of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub size: usize,
}

/// The omnibus test that produced a metric's p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OmnibusTest {
    KruskalWallis,
    OneWayAnova,
    MannWhitneyU,
    StudentT,
}

impl OmnibusTest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::KruskalWallis => "Kruskal-Wallis",
            Self::OneWayAnova => "one-way ANOVA",
            Self::MannWhitneyU => "Mann-Whitney U",
            Self::StudentT => "Student t-test",
        }
    }

    pub fn is_parametric(&self) -> bool {
        matches!(self, Self::OneWayAnova | Self::StudentT)
    }
}

impl fmt::Display for OmnibusTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display bound of a significant result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PValueDisplay {
    /// Two groups: bound of the test p-value
    Single(PValueBound),
    /// More groups: bound of each significant posthoc pair
    Pairwise(PairMatrix<PValueBound>),
}

/// Cohen's d of a significant result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EffectSizes {
    /// Two groups: first group minus second group
    Single(f64),
    /// More groups: row group minus column group for each significant pair
    ///
    /// Rows sort after columns, so the sign follows the sorted labels rather
    /// than the order in which the groups appear in the table.
    Pairwise(PairMatrix<f64>),
}

/// Outcome of the comparison of one metric across groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub metric: String,
    /// Groups in the order used by every matrix of this result
    pub groups: Vec<GroupSummary>,
    pub family: FamilyDecision,
    pub omnibus: OmnibusTest,
    /// Omnibus test statistic
    pub statistic: f64,
    /// Omnibus p-value
    pub pvalue: f64,
    pub pvalue_display: Option<PValueDisplay>,
    /// Significant lower-triangle posthoc p-values; `None` for two groups
    pub posthoc: Option<PairMatrix<f64>>,
    /// Every corrected posthoc p-value, both triangles and diagonal
    pub corrected_pvalues: Option<PairMatrix<f64>>,
    pub cohens_d: Option<EffectSizes>,
    /// Whether the parametric family was used
    pub parametric: bool,
}

impl MetricComparison {
    /// Whether the omnibus test passed the significance gate
    pub fn is_significant(&self) -> bool {
        self.pvalue_display.is_some()
    }

    pub fn group_labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }
}

/// Results of every requested metric, in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    results: Vec<MetricComparison>,
}

impl ComparisonReport {
    pub(crate) fn new(results: Vec<MetricComparison>) -> Self {
        Self { results }
    }

    pub fn get(&self, metric: &str) -> Option<&MetricComparison> {
        self.results.iter().find(|r| r.metric == metric)
    }

    pub fn metrics(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.metric.as_str()).collect()
    }

    /// Metrics whose omnibus test was significant
    pub fn significant_metrics(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_significant())
            .map(|r| r.metric.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricComparison> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// One row per metric: test, statistic, p-value, bound, family and significance
    ///
    /// `pvalue_display` is filled for two-group metrics only; pairwise bounds
    /// live in the per-metric matrices.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let display: Vec<Option<String>> = self
            .results
            .iter()
            .map(|r| match &r.pvalue_display {
                Some(PValueDisplay::Single(bound)) => Some(bound.to_string()),
                _ => None,
            })
            .collect();

        let df = df![
            "metric" => self.results.iter().map(|r| r.metric.clone()).collect::<Vec<_>>(),
            "test" => self.results.iter().map(|r| r.omnibus.name()).collect::<Vec<_>>(),
            "statistic" => self.results.iter().map(|r| r.statistic).collect::<Vec<_>>(),
            "pvalue" => self.results.iter().map(|r| r.pvalue).collect::<Vec<_>>(),
            "pvalue_display" => display,
            "parametric" => self.results.iter().map(|r| r.parametric).collect::<Vec<_>>(),
            "significant" => self.results.iter().map(|r| r.is_significant()).collect::<Vec<_>>(),
        ]?;
        Ok(df)
    }
}

impl IntoIterator for ComparisonReport {
    type Item = MetricComparison;
    type IntoIter = std::vec::IntoIter<MetricComparison>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComparisonReport {
    type Item = &'a MetricComparison;
    type IntoIter = std::slice::Iter<'a, MetricComparison>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
