//! Error types for compare-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Insufficient data for metric '{metric}' in group '{group}': expected at least {expected} observations, got {actual}")]
    InsufficientData {
        metric: String,
        group: String,
        expected: usize,
        actual: usize,
    },

    #[error("Degenerate sample for metric '{metric}' in group '{group}': {reason}")]
    DegenerateSample {
        metric: String,
        group: String,
        reason: String,
    },

    #[error("{stage} failed for metric '{metric}': {source}")]
    Test {
        metric: String,
        stage: &'static str,
        #[source]
        source: compare_core::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach metric and group context to a failed statistical primitive
    ///
    /// `group` names the group (or comma-separated groups) the primitive ran on.
    pub(crate) fn from_test(
        metric: &str,
        group: &str,
        stage: &'static str,
        source: compare_core::Error,
    ) -> Self {
        match source {
            compare_core::Error::InsufficientData { expected, actual } => Self::InsufficientData {
                metric: metric.to_string(),
                group: group.to_string(),
                expected,
                actual,
            },
            compare_core::Error::DegenerateSample(reason) => Self::DegenerateSample {
                metric: metric.to_string(),
                group: group.to_string(),
                reason,
            },
            source => Self::Test {
                metric: metric.to_string(),
                stage,
                source,
            },
        }
    }

    /// The metric the error is attributed to, if any
    pub fn metric(&self) -> Option<&str> {
        match self {
            Self::InsufficientData { metric, .. }
            | Self::DegenerateSample { metric, .. }
            | Self::Test { metric, .. } => Some(metric),
            Self::Polars(_) | Self::InvalidConfiguration(_) => None,
        }
    }
}
