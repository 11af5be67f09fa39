//! Types for effect size representation

use serde::Serialize;
use std::fmt;

/// An effect size measurement with magnitude and interpretation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectSize {
    /// The signed effect size (group 1 minus group 2)
    pub magnitude: f64,
    /// Interpretation of the magnitude
    pub interpretation: EffectSizeInterpretation,
    /// Sample sizes (group1, group2)
    pub sample_sizes: (usize, usize),
}

impl EffectSize {
    /// Create a new effect size
    pub fn new(magnitude: f64, sample_sizes: (usize, usize)) -> Self {
        Self {
            magnitude,
            interpretation: EffectSizeInterpretation::from_magnitude(magnitude),
            sample_sizes,
        }
    }

    /// Get the absolute magnitude
    pub fn abs_magnitude(&self) -> f64 {
        self.magnitude.abs()
    }

    /// Check if the effect size is practically significant
    pub fn is_practically_significant(&self) -> bool {
        matches!(
            self.interpretation,
            EffectSizeInterpretation::Medium | EffectSizeInterpretation::Large
        )
    }

    /// Check if the effect is in favor of group 1 (its mean is larger)
    pub fn favors_group1(&self) -> bool {
        self.magnitude > 0.0
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cohen's d: {:.3} ({})", self.magnitude, self.interpretation)
    }
}

/// Interpretation of a standardized mean difference following Cohen's conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSizeInterpretation {
    /// |d| < 0.2
    Negligible,
    /// 0.2 <= |d| < 0.5
    Small,
    /// 0.5 <= |d| < 0.8
    Medium,
    /// |d| >= 0.8
    Large,
}

impl EffectSizeInterpretation {
    /// Get interpretation from magnitude
    pub fn from_magnitude(magnitude: f64) -> Self {
        let abs_magnitude = magnitude.abs();
        if abs_magnitude < 0.2 {
            Self::Negligible
        } else if abs_magnitude < 0.5 {
            Self::Small
        } else if abs_magnitude < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl fmt::Display for EffectSizeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        write!(f, "{}", s)
    }
}
