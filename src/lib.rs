//! Automated group comparison
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`compare_core`]: error type, sample statistics and p-value bounds
//! - [`compare_effect`]: Cohen's d and effect size interpretation
//! - [`compare_tests`]: normality, variance, omnibus, two-sample and posthoc tests
//! - [`compare_polars`]: the comparison pipeline over Polars DataFrames
//!
//! The most common entry points are available at the crate root.
//!
//! # Example
//!
//! ```rust,ignore
//! use group_compare::{CompareConfig, GroupComparisonExt};
//!
//! let report = df.compare_groups("treatment", &["weight"], &CompareConfig::default())?;
//! for result in &report {
//!     if let Some(display) = &result.pvalue_display {
//!         println!("{}: {:?}", result.metric, display);
//!     }
//! }
//! ```

pub use compare_core;
pub use compare_effect;
pub use compare_polars;
pub use compare_tests;

pub use compare_core::PValueBound;
pub use compare_effect::{cohen_d, CohenD, EffectSize, EffectSizeEstimator};
pub use compare_polars::{
    compare_groups, compare_groups_isolated, compare_groups_with_reporter, CompareConfig,
    ComparisonReport, ComparisonReporter, EffectSizes, Error, FamilyDecision, FamilyReason,
    GroupComparator, GroupComparisonExt, MetricComparison, NullReporter, OmnibusTest, PairMatrix,
    PValueDisplay, Result, TracingReporter,
};
pub use compare_tests::{ClassicTests, Correction, HypothesisTests, TestOutcome};
