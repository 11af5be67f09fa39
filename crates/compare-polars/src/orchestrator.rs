//! The per-metric comparison pipeline
//!
//! For each metric: partition by group, choose the test family, run the
//! omnibus test and, when it is significant, quantify the difference with
//! posthoc tests (more than two groups) or a single effect size (two groups).

use crate::family::{self, FamilyDecision};
use crate::matrix::PairMatrix;
use crate::partition::{GroupIndex, GroupedSamples};
use crate::reporter::{ComparisonReporter, NullReporter, TracingReporter};
use crate::result::{ComparisonReport, EffectSizes, MetricComparison, OmnibusTest, PValueDisplay};
use crate::{CompareConfig, Error, Result};
use compare_core::PValueBound;
use compare_effect::{cohen_d, CohenD, EffectSizeEstimator};
use compare_tests::{ClassicTests, HypothesisTests, TestOutcome};
use polars::prelude::*;
use tracing::{debug, instrument};

/// Per-metric outcomes of an isolated run, in request order
pub type IsolatedResults = Vec<(String, Result<MetricComparison>)>;

/// Runs group comparisons with a fixed configuration, test suite and reporter
///
/// # Example
///
/// ```rust,ignore
/// use compare_polars::{CompareConfig, GroupComparator};
///
/// let comparator = GroupComparator::new(CompareConfig::default().with_significance(0.05));
/// let report = comparator.compare(&df, "treatment", &["weight", "height"])?;
/// for result in &report {
///     println!("{}: p = {}", result.metric, result.pvalue);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GroupComparator<T = ClassicTests, R = NullReporter> {
    config: CompareConfig,
    tests: T,
    reporter: R,
}

impl GroupComparator {
    /// Comparator using the classic test suite and no narration
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            tests: ClassicTests,
            reporter: NullReporter,
        }
    }
}

impl<T: HypothesisTests, R: ComparisonReporter> GroupComparator<T, R> {
    /// Replace the hypothesis-test suite
    pub fn with_tests<U: HypothesisTests>(self, tests: U) -> GroupComparator<U, R> {
        GroupComparator {
            config: self.config,
            tests,
            reporter: self.reporter,
        }
    }

    /// Replace the reporter
    pub fn with_reporter<Q: ComparisonReporter>(self, reporter: Q) -> GroupComparator<T, Q> {
        GroupComparator {
            config: self.config,
            tests: self.tests,
            reporter,
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Compare every metric; the first failing metric aborts the run
    pub fn compare(
        &self,
        df: &DataFrame,
        group_column: &str,
        metrics: &[&str],
    ) -> Result<ComparisonReport> {
        let index = self.prepare(df, group_column, metrics)?;
        let results = self.compare_all(df, &index, metrics)?;
        Ok(ComparisonReport::new(results))
    }

    /// Compare every metric, keeping each metric's failure to itself
    ///
    /// Only configuration problems shared by all metrics (significance,
    /// grouping column) fail the whole call.
    pub fn compare_isolated(
        &self,
        df: &DataFrame,
        group_column: &str,
        metrics: &[&str],
    ) -> Result<IsolatedResults> {
        let index = self.prepare(df, group_column, metrics)?;
        let results = self.compare_each(df, &index, metrics);
        Ok(metrics
            .iter()
            .map(|m| m.to_string())
            .zip(results)
            .collect())
    }

    fn prepare(&self, df: &DataFrame, group_column: &str, metrics: &[&str]) -> Result<GroupIndex> {
        self.config.validate()?;
        if metrics.is_empty() {
            return Err(Error::InvalidConfiguration(
                "no metric columns requested".to_string(),
            ));
        }
        if metrics.contains(&group_column) {
            return Err(Error::InvalidConfiguration(format!(
                "column '{group_column}' cannot be both the group column and a metric"
            )));
        }
        GroupIndex::new(df, group_column)
    }

    #[cfg(not(feature = "parallel"))]
    fn compare_all(
        &self,
        df: &DataFrame,
        index: &GroupIndex,
        metrics: &[&str],
    ) -> Result<Vec<MetricComparison>> {
        metrics
            .iter()
            .map(|metric| self.compare_metric(df, index, metric))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn compare_all(
        &self,
        df: &DataFrame,
        index: &GroupIndex,
        metrics: &[&str],
    ) -> Result<Vec<MetricComparison>> {
        use rayon::prelude::*;
        metrics
            .par_iter()
            .map(|metric| self.compare_metric(df, index, metric))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn compare_each(
        &self,
        df: &DataFrame,
        index: &GroupIndex,
        metrics: &[&str],
    ) -> Vec<Result<MetricComparison>> {
        metrics
            .iter()
            .map(|metric| self.compare_metric(df, index, metric))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn compare_each(
        &self,
        df: &DataFrame,
        index: &GroupIndex,
        metrics: &[&str],
    ) -> Vec<Result<MetricComparison>> {
        use rayon::prelude::*;
        metrics
            .par_iter()
            .map(|metric| self.compare_metric(df, index, metric))
            .collect()
    }

    /// Run the full pipeline on one metric
    #[instrument(skip(self, df, index), fields(groups = index.len(), group_column = index.column()))]
    pub fn compare_metric(
        &self,
        df: &DataFrame,
        index: &GroupIndex,
        metric: &str,
    ) -> Result<MetricComparison> {
        let samples = index.partition(df, metric)?;
        let groups = samples.summaries();
        self.reporter.metric_started(metric, &groups);

        let decision = family::decide(&self.tests, &self.reporter, &samples, &self.config)?;
        let (omnibus, outcome) = self.omnibus(&samples, &decision)?;
        let significant = outcome.rejects(self.config.significance);
        debug!(
            test = omnibus.name(),
            statistic = outcome.statistic,
            pvalue = outcome.pvalue,
            significant,
            "omnibus"
        );
        self.reporter
            .omnibus_completed(metric, omnibus, &outcome, significant);

        let mut result = MetricComparison {
            metric: metric.to_string(),
            groups,
            parametric: !decision.needs_nonparametric,
            family: decision,
            omnibus,
            statistic: outcome.statistic,
            pvalue: outcome.pvalue,
            pvalue_display: None,
            posthoc: None,
            corrected_pvalues: None,
            cohens_d: None,
        };

        if significant {
            if samples.len() > 2 {
                self.posthoc(&samples, &mut result)?;
            } else {
                self.two_sample(&samples, &mut result)?;
            }
        }
        Ok(result)
    }

    fn omnibus(
        &self,
        samples: &GroupedSamples,
        decision: &FamilyDecision,
    ) -> Result<(OmnibusTest, TestOutcome)> {
        let groups = samples.slices();
        let test = match (groups.len() > 2, decision.needs_nonparametric) {
            (true, true) => OmnibusTest::KruskalWallis,
            (true, false) => OmnibusTest::OneWayAnova,
            (false, true) => OmnibusTest::MannWhitneyU,
            (false, false) => OmnibusTest::StudentT,
        };

        let outcome = match test {
            OmnibusTest::KruskalWallis => self.tests.rank_omnibus(&groups),
            OmnibusTest::OneWayAnova => self.tests.variance_omnibus(&groups),
            OmnibusTest::MannWhitneyU => self.tests.rank_two_sample(groups[0], groups[1]),
            OmnibusTest::StudentT => self.tests.t_two_sample(groups[0], groups[1]),
        }
        .map_err(|e| Error::from_test(samples.metric(), &samples.scope(), "omnibus test", e))?;

        Ok((test, outcome))
    }

    /// Single effect size and bound for a significant two-group metric
    fn two_sample(&self, samples: &GroupedSamples, result: &mut MetricComparison) -> Result<()> {
        let metric = samples.metric();
        let scope = samples.scope();
        let groups = samples.slices();

        let effect = CohenD::new()
            .estimate(groups[0], groups[1])
            .map_err(|e| Error::from_test(metric, &scope, "Cohen's d", e))?;
        let bound = PValueBound::new(result.pvalue)
            .map_err(|e| Error::from_test(metric, &scope, "p-value bound", e))?;

        self.reporter
            .two_sample_completed(metric, result.pvalue, &bound, &effect);
        result.pvalue_display = Some(PValueDisplay::Single(bound));
        result.cohens_d = Some(EffectSizes::Single(effect.magnitude));
        Ok(())
    }

    /// Posthoc matrices for a significant metric with more than two groups
    ///
    /// Only lower-triangle pairs (row after column in group order) whose
    /// corrected p-value passes the significance level are kept.
    fn posthoc(&self, samples: &GroupedSamples, result: &mut MetricComparison) -> Result<()> {
        let metric = samples.metric();
        let groups = samples.slices();
        let alpha = self.config.significance;
        let correction = self.config.correction;

        let corrected = if result.parametric {
            self.tests.t_posthoc(&groups, correction)
        } else {
            self.tests.rank_posthoc(&groups, correction)
        }
        .map_err(|e| Error::from_test(metric, &samples.scope(), "posthoc test", e))?;

        let labels = samples.labels().to_vec();
        let full = PairMatrix::from_fn(labels.clone(), |row, col| Some(corrected.get(row, col)));
        let mut kept = PairMatrix::empty(labels.clone());
        let mut bounds = PairMatrix::empty(labels.clone());
        let mut effects = PairMatrix::empty(labels);

        for row in 0..groups.len() {
            for col in 0..row {
                let p = corrected.get(row, col);
                if !(p < alpha) {
                    continue;
                }
                let scope = samples.pair_scope(row, col);
                let d = cohen_d(groups[row], groups[col])
                    .map_err(|e| Error::from_test(metric, &scope, "Cohen's d", e))?;
                let bound = PValueBound::new(p)
                    .map_err(|e| Error::from_test(metric, &scope, "p-value bound", e))?;
                kept.set(row, col, p);
                bounds.set(row, col, bound);
                effects.set(row, col, d);
            }
        }
        debug!(metric, significant_pairs = kept.count(), %correction, "posthoc");

        self.reporter
            .posthoc_completed(metric, &full, &bounds, &effects);
        result.posthoc = Some(kept);
        result.corrected_pvalues = Some(full);
        result.pvalue_display = Some(PValueDisplay::Pairwise(bounds));
        result.cohens_d = Some(EffectSizes::Pairwise(effects));
        Ok(())
    }
}

/// Compare `metrics` across the groups of `group_column`
///
/// Fails on the first metric that cannot be compared. With
/// `config.verbose` every step is narrated through [`TracingReporter`].
pub fn compare_groups(
    df: &DataFrame,
    group_column: &str,
    metrics: &[&str],
    config: &CompareConfig,
) -> Result<ComparisonReport> {
    if config.verbose {
        compare_groups_with_reporter(df, group_column, metrics, config, &TracingReporter)
    } else {
        compare_groups_with_reporter(df, group_column, metrics, config, &NullReporter)
    }
}

/// [`compare_groups`] narrating to a caller-supplied reporter
pub fn compare_groups_with_reporter<R: ComparisonReporter + ?Sized>(
    df: &DataFrame,
    group_column: &str,
    metrics: &[&str],
    config: &CompareConfig,
    reporter: &R,
) -> Result<ComparisonReport> {
    GroupComparator::new(*config)
        .with_reporter(reporter)
        .compare(df, group_column, metrics)
}

/// Compare each metric independently; a failing metric does not affect the others
pub fn compare_groups_isolated(
    df: &DataFrame,
    group_column: &str,
    metrics: &[&str],
    config: &CompareConfig,
) -> Result<IsolatedResults> {
    if config.verbose {
        GroupComparator::new(*config)
            .with_reporter(TracingReporter)
            .compare_isolated(df, group_column, metrics)
    } else {
        GroupComparator::new(*config).compare_isolated(df, group_column, metrics)
    }
}
