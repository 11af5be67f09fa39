//! Two-sample location tests
//!
//! - Student's t-test with pooled variance
//! - Mann-Whitney U test, exact for small tie-free samples and normal
//!   approximation (tie and continuity corrected) otherwise

use crate::types::{standard_normal, t_two_sided, TestOutcome};
use compare_core::{ensure_finite, ensure_len, sample, Error, Result};
use statrs::distribution::ContinuousCDF;

/// Largest size of the smaller sample for which the exact U distribution is used
pub const EXACT_U_LIMIT: usize = 8;

/// Independent two-sample Student t-test (equal variances), two-sided
pub fn student_t(x: &[f64], y: &[f64]) -> Result<TestOutcome> {
    ensure_len(x, 2)?;
    ensure_len(y, 2)?;
    ensure_finite(x, "first sample")?;
    ensure_finite(y, "second sample")?;

    let nx = x.len() as f64;
    let ny = y.len() as f64;
    let df = nx + ny - 2.0;
    let diff = sample::mean(x)? - sample::mean(y)?;
    let pooled = ((nx - 1.0) * sample::variance(x)? + (ny - 1.0) * sample::variance(y)?) / df;
    let se = (pooled * (1.0 / nx + 1.0 / ny)).sqrt();

    if se <= 0.0 {
        if diff == 0.0 {
            return Err(Error::DegenerateSample(
                "both samples are constant and equal, t is undefined".to_string(),
            ));
        }
        return Ok(TestOutcome::new(diff.signum() * f64::INFINITY, 0.0));
    }

    let t = diff / se;
    Ok(TestOutcome::new(t, t_two_sided(t, df)?))
}

/// Mann-Whitney U test, two-sided
///
/// The reported statistic is U of the first sample. The exact null
/// distribution is used when the smaller sample has at most
/// [`EXACT_U_LIMIT`] observations and there are no ties.
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> Result<TestOutcome> {
    ensure_len(x, 1)?;
    ensure_len(y, 1)?;
    ensure_finite(x, "first sample")?;
    ensure_finite(y, "second sample")?;

    let ranked = sample::pooled_ranks(&[x, y])?;
    let n1 = x.len();
    let n2 = y.len();
    let n1f = n1 as f64;
    let n2f = n2 as f64;

    let u1 = ranked.rank_sum(0) - n1f * (n1f + 1.0) / 2.0;
    let u2 = n1f * n2f - u1;
    let u_max = u1.max(u2);

    let pvalue = if n1.min(n2) <= EXACT_U_LIMIT && !ranked.has_ties() {
        // By symmetry P(U >= u_max) = P(U <= u_min)
        2.0 * exact_lower_tail(n1, n2, u1.min(u2).round() as usize)
    } else {
        let n = n1f + n2f;
        let mu = n1f * n2f / 2.0;
        let var = n1f * n2f / 12.0 * ((n + 1.0) - ranked.tie_sum / (n * (n - 1.0)));
        if var <= 0.0 {
            return Err(Error::DegenerateSample(
                "all values are identical, U has no spread".to_string(),
            ));
        }
        let z = (u_max - mu - 0.5) / var.sqrt();
        2.0 * standard_normal()?.sf(z)
    };

    Ok(TestOutcome::new(u1, pvalue))
}

/// P(U <= u) under H₀ for sample sizes `n1`, `n2` without ties
///
/// The number of arrangements giving U = k is the coefficient of q^k in the
/// Gaussian binomial [n1 + n2 choose m]_q with m = min(n1, n2). Only
/// coefficients up to `u` are needed, so the series is truncated there.
fn exact_lower_tail(n1: usize, n2: usize, u: usize) -> f64 {
    let m = n1.min(n2);
    let other = n1.max(n2);
    let mut coeffs = vec![0.0f64; u + 1];
    coeffs[0] = 1.0;

    for i in 1..=m {
        // Divide by (1 - q^i): running sum with stride i
        for k in i..=u {
            coeffs[k] += coeffs[k - i];
        }
        // Multiply by (1 - q^(other + i)), from the top down
        let a = other + i;
        for k in (a..=u).rev() {
            coeffs[k] -= coeffs[k - a];
        }
    }

    let total = binomial(n1 + n2, m);
    (coeffs.iter().sum::<f64>() / total).min(0.5)
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}
