//! Hypothesis tests for comparing groups of observations
//!
//! This crate provides the statistical primitives a group comparison needs:
//!
//! - **Diagnostics**: Shapiro-Wilk normality, Levene (median-centred) equal variance
//! - **Omnibus**: one-way ANOVA, Kruskal-Wallis
//! - **Two-sample**: Student t, Mann-Whitney U
//! - **Posthoc**: Conover-Iman, pairwise Student t
//! - **Correction**: Holm, Bonferroni
//!
//! Distributions come from `statrs`. All tests are two-sided where that is
//! meaningful and return a [`TestOutcome`].
//!
//! # Example
//!
//! ```rust
//! use compare_tests::{ClassicTests, Correction, HypothesisTests};
//!
//! let a = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let b = [10.0, 11.0, 12.0, 13.0, 14.0];
//! let c = [2.0, 3.0, 4.0, 5.0, 6.5];
//!
//! let tests = ClassicTests;
//! let omnibus = tests.rank_omnibus(&[&a, &b, &c]).unwrap();
//! assert!(omnibus.pvalue < 0.05);
//!
//! let pairs = tests.rank_posthoc(&[&a, &b, &c], Correction::Holm).unwrap();
//! assert!(pairs.get(0, 1) < pairs.get(0, 2));
//! ```

pub mod correction;
pub mod normality;
pub mod omnibus;
pub mod posthoc;
pub mod suite;
pub mod two_sample;
pub mod types;
pub mod variance;

pub use correction::Correction;
pub use normality::shapiro_wilk;
pub use omnibus::{kruskal_wallis, one_way_anova};
pub use posthoc::{conover, pairwise_t};
pub use suite::{ClassicTests, HypothesisTests};
pub use two_sample::{mann_whitney_u, student_t};
pub use types::{SymmetricMatrix, TestOutcome};
pub use variance::levene;
