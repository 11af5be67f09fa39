//! Automated group comparison on Polars DataFrames
//!
//! Given a DataFrame with a grouping column and numeric metric columns, this
//! crate decides per metric whether parametric or rank-based tests apply,
//! runs the matching omnibus test and, when it is significant, reports the
//! significant pairs with p-value bounds and Cohen's d.
//!
//! Pipeline per metric:
//!
//! 1. Shapiro-Wilk on every group, then Levene across groups; any rejection
//!    selects the rank-based family
//! 2. More than two groups always use rank tests unless
//!    [`CompareConfig::rank_tests_for_many_groups`] is disabled
//! 3. Kruskal-Wallis / one-way ANOVA for more than two groups, Mann-Whitney U /
//!    Student t for two
//! 4. On significance: Conover or pairwise t posthoc with Holm correction, or
//!    a single Cohen's d for two groups
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use compare_polars::{CompareConfig, GroupComparisonExt};
//!
//! let df = df![
//!     "group" => ["a", "a", "a", "a", "a", "b", "b", "b", "b", "b"],
//!     "value" => [1.0, 2.0, 3.0, 4.0, 5.0, 10.0, 11.0, 12.0, 13.0, 14.0],
//! ]
//! .unwrap();
//!
//! let report = df
//!     .compare_groups("group", &["value"], &CompareConfig::default())
//!     .unwrap();
//! let result = report.get("value").unwrap();
//! assert!(result.is_significant());
//! assert!(result.posthoc.is_none());
//! ```

mod config;
mod error;
mod family;
mod matrix;
mod orchestrator;
mod partition;
mod reporter;
mod result;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use family::{FamilyDecision, FamilyReason};
pub use matrix::PairMatrix;
pub use orchestrator::{
    compare_groups, compare_groups_isolated, compare_groups_with_reporter, GroupComparator,
    IsolatedResults,
};
pub use partition::{GroupIndex, GroupedSamples};
pub use reporter::{ComparisonReporter, NullReporter, TracingReporter};
pub use result::{
    ComparisonReport, EffectSizes, GroupSummary, MetricComparison, OmnibusTest, PValueDisplay,
};
pub use traits::*;

// Re-export the types results are built from
pub use compare_core::PValueBound;
pub use compare_effect::{cohen_d, EffectSize};
pub use compare_tests::{ClassicTests, Correction, HypothesisTests, TestOutcome};
