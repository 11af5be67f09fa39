//! k-sample omnibus tests
//!
//! - One-way ANOVA: classic F test on group means
//! - Kruskal-Wallis: rank-based test on the pooled ranks, corrected for ties

use crate::types::{chi2_upper, f_upper, TestOutcome};
use compare_core::{ensure_finite, sample, Error, Result};

pub(crate) fn check_groups(groups: &[&[f64]]) -> Result<()> {
    if groups.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "at least 2 groups are required, got {}",
            groups.len()
        )));
    }
    for group in groups {
        if group.is_empty() {
            return Err(Error::too_small(1, 0));
        }
        ensure_finite(group, "group")?;
    }
    Ok(())
}

/// One-way ANOVA F test of H₀: all group means are equal
///
/// When every group is internally constant but the groups differ, F is
/// infinite and p is 0; when all values are identical the test is undefined.
pub fn one_way_anova(groups: &[&[f64]]) -> Result<TestOutcome> {
    check_groups(groups)?;

    let k = groups.len();
    let total: usize = groups.iter().map(|g| g.len()).sum();
    if total <= k {
        return Err(Error::too_small(k + 1, total));
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let m = sample::mean(group)?;
        ss_between += group.len() as f64 * (m - grand_mean).powi(2);
        ss_within += sample::sum_squared_deviations(group)?;
    }

    let df_between = (k - 1) as f64;
    let df_within = (total - k) as f64;

    if ss_within <= 0.0 {
        if ss_between <= 0.0 {
            return Err(Error::DegenerateSample(
                "all values are identical, F is undefined".to_string(),
            ));
        }
        return Ok(TestOutcome::new(f64::INFINITY, 0.0));
    }

    let f = (ss_between / df_between) / (ss_within / df_within);
    Ok(TestOutcome::new(f, f_upper(f, df_between, df_within)?))
}

/// Kruskal-Wallis H test of H₀: all groups come from the same distribution
///
/// H is divided by the tie correction `1 - Σ(t³ - t) / (N³ - N)` and
/// compared to a chi-squared distribution with `k - 1` degrees of freedom.
pub fn kruskal_wallis(groups: &[&[f64]]) -> Result<TestOutcome> {
    check_groups(groups)?;

    let ranked = sample::pooled_ranks(groups)?;
    let correction = ranked.tie_correction();
    if correction <= 0.0 {
        return Err(Error::DegenerateSample(
            "all values are identical, ranks carry no information".to_string(),
        ));
    }

    let h = tie_corrected_h(groups, &ranked);
    let df = (groups.len() - 1) as f64;
    Ok(TestOutcome::new(h, chi2_upper(h, df)?))
}

/// Tie-corrected Kruskal-Wallis statistic from pooled ranks
pub(crate) fn tie_corrected_h(groups: &[&[f64]], ranked: &sample::PooledRanks) -> f64 {
    let n = ranked.total as f64;
    let sum: f64 = groups
        .iter()
        .enumerate()
        .map(|(i, g)| ranked.rank_sum(i).powi(2) / g.len() as f64)
        .sum();
    let h = 12.0 / (n * (n + 1.0)) * sum - 3.0 * (n + 1.0);
    h / ranked.tie_correction()
}
