//! Levene test for equality of variances
//!
//! Uses the median-centred (Brown-Forsythe) variant: a one-way ANOVA on the
//! absolute deviations of each observation from its group median.

use crate::omnibus::{check_groups, one_way_anova};
use crate::types::TestOutcome;
use compare_core::{sample, Result};
use tracing::debug;

/// Levene test of H₀: all groups have the same variance
///
/// When every absolute deviation is the same value the groups share one
/// spread exactly and the test does not reject (W = 0, p = 1).
pub fn levene(groups: &[&[f64]]) -> Result<TestOutcome> {
    check_groups(groups)?;

    let deviations = groups
        .iter()
        .map(|group| {
            let center = sample::median(group)?;
            Ok(group.iter().map(|x| (x - center).abs()).collect())
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let mut flat = deviations.iter().flatten();
    if let Some(first) = flat.next() {
        if flat.all(|d| d == first) {
            debug!(deviation = *first, "Levene deviations are all equal");
            return Ok(TestOutcome::new(0.0, 1.0));
        }
    }

    let refs: Vec<&[f64]> = deviations.iter().map(Vec::as_slice).collect();
    one_way_anova(&refs)
}
