//! Effect size measurement for group comparisons
//!
//! Effect sizes quantify the magnitude of a difference between two groups,
//! complementing the p-value of a significance test. This crate provides the
//! pooled-variance standardized mean difference (Cohen's d) used to describe
//! every significant pairwise comparison.
//!
//! # Example
//!
//! ```rust
//! use compare_effect::{cohen_d, CohenD, EffectSizeEstimator};
//!
//! let group1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let group2 = vec![3.0, 4.0, 5.0, 6.0, 7.0];
//!
//! let d = cohen_d(&group1, &group2).unwrap();
//! assert!(d < 0.0);
//!
//! let effect = CohenD::new().estimate(&group1, &group2).unwrap();
//! println!("{}", effect);
//! ```

mod cohen_d;
mod traits;
mod types;

// Re-exports
pub use cohen_d::{cohen_d, CohenD};
pub use traits::EffectSizeEstimator;
pub use types::{EffectSize, EffectSizeInterpretation};
