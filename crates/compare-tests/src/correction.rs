//! Multiple-comparison correction of p-value families

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Family-wise error correction applied to posthoc p-values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correction {
    /// Holm step-down procedure
    #[default]
    Holm,
    /// Bonferroni: multiply by the family size
    Bonferroni,
    /// Leave p-values unadjusted
    None,
}

impl Correction {
    /// Adjust a family of p-values, preserving input order
    ///
    /// Adjusted values are capped at 1 and never smaller than the raw ones.
    pub fn adjust(&self, pvalues: &[f64]) -> Vec<f64> {
        let m = pvalues.len() as f64;
        match self {
            Correction::None => pvalues.to_vec(),
            Correction::Bonferroni => pvalues.iter().map(|p| (p * m).min(1.0)).collect(),
            Correction::Holm => {
                let mut order: Vec<usize> = (0..pvalues.len()).collect();
                order.sort_by(|&a, &b| {
                    pvalues[a]
                        .partial_cmp(&pvalues[b])
                        .unwrap_or(Ordering::Equal)
                });

                let mut adjusted = vec![0.0; pvalues.len()];
                let mut running = 0.0f64;
                for (rank, &idx) in order.iter().enumerate() {
                    let scaled = ((m - rank as f64) * pvalues[idx]).min(1.0);
                    running = running.max(scaled);
                    adjusted[idx] = running;
                }
                adjusted
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Correction::Holm => "holm",
            Correction::Bonferroni => "bonferroni",
            Correction::None => "none",
        }
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
