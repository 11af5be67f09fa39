//! Pairwise posthoc comparisons following a significant omnibus test
//!
//! Both procedures return a [`SymmetricMatrix`] of corrected p-values indexed
//! by group position, with 1.0 on the diagonal.

use crate::correction::Correction;
use crate::omnibus::{check_groups, tie_corrected_h};
use crate::two_sample::student_t;
use crate::types::{t_two_sided, SymmetricMatrix};
use compare_core::{sample, Error, Result};
use tracing::debug;

/// Conover-Iman test on pooled ranks
///
/// For each pair the difference of mean ranks is compared against a
/// Student t distribution with `N - k` degrees of freedom, using the
/// tie-corrected Kruskal-Wallis statistic in the pooled variance term.
pub fn conover(groups: &[&[f64]], correction: Correction) -> Result<SymmetricMatrix> {
    check_groups(groups)?;

    let k = groups.len();
    let ranked = sample::pooled_ranks(groups)?;
    let n = ranked.total;
    if n <= k {
        return Err(Error::too_small(k + 1, n));
    }
    if ranked.tie_correction() <= 0.0 {
        return Err(Error::DegenerateSample(
            "all values are identical, ranks carry no information".to_string(),
        ));
    }

    let nf = n as f64;
    let df = (n - k) as f64;
    let h = tie_corrected_h(groups, &ranked);
    let s2 = if ranked.has_ties() {
        let sum_sq: f64 = ranked.ranks.iter().flatten().map(|r| r * r).sum();
        (sum_sq - nf * (nf + 1.0).powi(2) / 4.0) / (nf - 1.0)
    } else {
        nf * (nf + 1.0) / 12.0
    };
    let d = (nf - 1.0 - h) / df;
    debug!(n, k, h, s2, d, "Conover pooled terms");

    let mut result = SymmetricMatrix::new(k, 1.0);
    let pairs: Vec<(usize, usize)> = result.pairs().collect();
    let raw = pairs
        .iter()
        .map(|&(i, j)| {
            let diff = (ranked.mean_rank(i) - ranked.mean_rank(j)).abs();
            let b = 1.0 / groups[i].len() as f64 + 1.0 / groups[j].len() as f64;
            let denom = s2 * b * d;
            if denom <= 0.0 {
                // Groups are perfectly separated by rank
                return Ok(if diff > 0.0 { 0.0 } else { 1.0 });
            }
            t_two_sided(diff / denom.sqrt(), df)
        })
        .collect::<Result<Vec<f64>>>()?;

    for (&(i, j), p) in pairs.iter().zip(correction.adjust(&raw)) {
        result.set(i, j, p);
    }
    Ok(result)
}

/// Student t-test on every pair of groups
pub fn pairwise_t(groups: &[&[f64]], correction: Correction) -> Result<SymmetricMatrix> {
    check_groups(groups)?;

    let mut result = SymmetricMatrix::new(groups.len(), 1.0);
    let pairs: Vec<(usize, usize)> = result.pairs().collect();
    let raw = pairs
        .iter()
        .map(|&(i, j)| student_t(groups[i], groups[j]).map(|outcome| outcome.pvalue))
        .collect::<Result<Vec<f64>>>()?;

    for (&(i, j), p) in pairs.iter().zip(correction.adjust(&raw)) {
        result.set(i, j, p);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn three_groups() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let a: Vec<f64> = (0..8).map(|i| i as f64 * 0.5).collect();
        let b: Vec<f64> = (0..8).map(|i| i as f64 * 0.5 + 0.25).collect();
        let c: Vec<f64> = (0..8).map(|i| i as f64 * 0.5 + 10.0).collect();
        (a, b, c)
    }

    #[test]
    fn test_conover_separates_shifted_group() {
        let (a, b, c) = three_groups();
        let m = conover(&[&a, &b, &c], Correction::Holm).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(1, 1), 1.0);
        assert!(m.get(0, 1) > 0.05, "p(a, b) = {}", m.get(0, 1));
        assert!(m.get(0, 2) < 0.01, "p(a, c) = {}", m.get(0, 2));
        assert!(m.get(1, 2) < 0.01, "p(b, c) = {}", m.get(1, 2));
        assert_eq!(m.get(2, 0), m.get(0, 2));
    }

    #[test]
    fn test_conover_correction_is_conservative() {
        let (a, b, c) = three_groups();
        let raw = conover(&[&a, &b, &c], Correction::None).unwrap();
        let holm = conover(&[&a, &b, &c], Correction::Holm).unwrap();
        let bonf = conover(&[&a, &b, &c], Correction::Bonferroni).unwrap();
        for (i, j) in raw.pairs() {
            assert!(holm.get(i, j) >= raw.get(i, j));
            assert!(bonf.get(i, j) >= holm.get(i, j) - 1e-15);
            assert!(bonf.get(i, j) <= 1.0);
        }
    }

    #[test]
    fn test_conover_identical_values() {
        let a = [1.0, 1.0];
        let b = [1.0, 1.0, 1.0];
        assert!(matches!(
            conover(&[&a, &b], Correction::Holm),
            Err(Error::DegenerateSample(_))
        ));
    }

    #[test]
    fn test_pairwise_t_matches_student() {
        let (a, b, c) = three_groups();
        let m = pairwise_t(&[&a, &b, &c], Correction::None).unwrap();
        let direct = student_t(&a, &c).unwrap();
        assert_abs_diff_eq!(m.get(0, 2), direct.pvalue, epsilon = 1e-15);
        assert!(m.get(0, 1) > 0.5);
    }
}
