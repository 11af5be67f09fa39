//! Error types for group comparison
//!
//! Provides the error type shared by the statistical crates of the workspace.

use thiserror::Error;

/// Core error type for statistical operations on samples
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The sample has no spread, so the statistic is undefined
    #[error("Degenerate sample: {0}")]
    DegenerateSample(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a sample that is shorter than required
    pub fn too_small(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }
}

/// Fail with [`Error::InsufficientData`] if `sample` has fewer than `min` values
pub fn ensure_len(sample: &[f64], min: usize) -> Result<()> {
    if sample.len() < min {
        return Err(Error::too_small(min, sample.len()));
    }
    Ok(())
}

/// Fail with [`Error::InvalidInput`] if `sample` contains NaN or infinities
pub fn ensure_finite(sample: &[f64], context: &str) -> Result<()> {
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must be positive");

        let err = Error::InsufficientData { expected: 3, actual: 2 };
        assert_eq!(err.to_string(), "Insufficient data: expected at least 3 samples, got 2");

        let err = Error::DegenerateSample("pooled variance is zero".to_string());
        assert_eq!(err.to_string(), "Degenerate sample: pooled variance is zero");
    }

    #[test]
    fn test_error_helper_functions() {
        assert_eq!(
            Error::too_small(3, 1),
            Error::InsufficientData { expected: 3, actual: 1 }
        );
        assert_eq!(
            Error::non_finite("sample").to_string(),
            "Invalid input: sample contains NaN or infinite values"
        );
    }

    #[test]
    fn test_guards() {
        assert!(ensure_len(&[1.0, 2.0], 2).is_ok());
        assert_eq!(
            ensure_len(&[1.0], 2),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        );
        assert!(ensure_finite(&[1.0, 2.0], "x").is_ok());
        assert!(ensure_finite(&[1.0, f64::NAN], "x").is_err());
        assert!(ensure_finite(&[f64::INFINITY], "x").is_err());
    }
}
