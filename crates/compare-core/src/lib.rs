//! Core types for automated group comparison
//!
//! This crate holds the pieces shared by the rest of the workspace:
//!
//! - [`Error`] / [`Result`]: the error type of every statistical primitive
//! - [`sample`]: mean, Bessel-corrected variance, median and pooled ranks
//! - [`PValueBound`]: the `<1e{n}` display form of a significant p-value
//!
//! # Example
//!
//! ```rust
//! use compare_core::{sample, PValueBound};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(sample::variance(&x).unwrap(), 2.5);
//! assert_eq!(PValueBound::new(0.004).unwrap().to_string(), "<1e-2");
//! ```

pub mod error;
pub mod pvalue;
pub mod sample;

pub use error::{ensure_finite, ensure_len, Error, Result};
pub use pvalue::{PValueBound, FLOOR_EXPONENT};
pub use sample::PooledRanks;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
