//! Human-readable p-value bounds
//!
//! Significant p-values are reported as a power-of-ten upper bound such as
//! `<1e-4` rather than as the raw float.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Smallest exponent ever reported; anything below `1e-10` prints `<1e-10`
pub const FLOOR_EXPONENT: i32 = -10;

/// Upper bound `10^exponent` on a p-value, displayed as `<1e{exponent}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct PValueBound {
    exponent: i32,
}

impl PValueBound {
    /// Bound a p-value in `[0, 1)`
    ///
    /// The exponent is `ceil(log10(p))`, floored at [`FLOOR_EXPONENT`]. When
    /// `p` is itself a power of ten the exponent is raised by one so that
    /// `p < 10^exponent` holds strictly.
    pub fn new(p: f64) -> Result<Self> {
        if !p.is_finite() || !(0.0..1.0).contains(&p) {
            return Err(Error::InvalidParameter(format!(
                "p-value {p} must be in [0, 1) to be bounded"
            )));
        }
        if p < 10f64.powi(FLOOR_EXPONENT) {
            return Ok(Self { exponent: FLOOR_EXPONENT });
        }
        let mut exponent = p.log10().ceil() as i32;
        if 10f64.powi(exponent) <= p {
            exponent += 1;
        }
        Ok(Self { exponent })
    }

    /// The power of ten bounding the p-value
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// The bound as a float, `10^exponent`
    pub fn upper(&self) -> f64 {
        10f64.powi(self.exponent)
    }
}

impl fmt::Display for PValueBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<1e{}", self.exponent)
    }
}

impl From<PValueBound> for String {
    fn from(bound: PValueBound) -> Self {
        bound.to_string()
    }
}
