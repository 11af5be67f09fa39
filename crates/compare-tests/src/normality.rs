//! Shapiro-Wilk normality test
//!
//! Follows Royston's approximation (Applied Statistics algorithm AS R94),
//! the same algorithm used by the common statistical packages, so p-values
//! agree with them to within floating point noise.

use crate::types::{standard_normal, TestOutcome};
use compare_core::{ensure_finite, ensure_len, Error, Result};
use statrs::distribution::ContinuousCDF;
use std::cmp::Ordering;
use tracing::warn;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

// Royston polynomial coefficients
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Minimum sample size accepted by the test
pub const MIN_SAMPLE: usize = 3;

/// Evaluate `c[0] + c[1]·x + c[2]·x² + ...`
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Shapiro-Wilk test of H₀: the sample comes from a normal distribution
///
/// Needs at least 3 observations. A sample whose values are all identical
/// has no defined W; it is reported as W = 1, p = 1 so that later stages
/// decide what a constant group means.
pub fn shapiro_wilk(sample: &[f64]) -> Result<TestOutcome> {
    ensure_len(sample, MIN_SAMPLE)?;
    ensure_finite(sample, "sample")?;

    let mut x = sample.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = x.len();

    if x[n - 1] - x[0] <= 0.0 {
        warn!(n, value = x[0], "Shapiro-Wilk on a constant sample, W taken as 1");
        return Ok(TestOutcome::new(1.0, 1.0));
    }

    let coefficients = coefficients(n)?;
    let w = statistic(&x, &coefficients).min(1.0);

    let pvalue = if n == 3 {
        // Exact distribution for n = 3
        (6.0 / PI) * (w.sqrt().asin() - PI / 3.0)
    } else {
        pvalue(w, n)?
    };

    Ok(TestOutcome::new(w, pvalue))
}

/// Antisymmetric weights `a_1..a_{n/2}` applied to the order statistics
fn coefficients(n: usize) -> Result<Vec<f64>> {
    let half = n / 2;
    if n == 3 {
        return Ok(vec![FRAC_1_SQRT_2]);
    }

    let normal = standard_normal()?;
    let nf = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; half];
    a[0] = a1;

    // The first one (n <= 5) or two (n > 5) weights get polynomial corrections
    let (corrected, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let num = summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1];
        let den = 1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2;
        (2, num / den)
    } else {
        let num = summ2 - 2.0 * m[0] * m[0];
        let den = 1.0 - 2.0 * a1 * a1;
        (1, num / den)
    };
    if !(fac > 0.0) {
        return Err(Error::Computation(format!(
            "Shapiro-Wilk coefficients are undefined for n = {n}"
        )));
    }
    let fac = fac.sqrt();
    for i in corrected..half {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

/// W = (Σ aᵢ (x₍ₙ₊₁₋ᵢ₎ - x₍ᵢ₎))² / Σ (xᵢ - x̄)²
fn statistic(sorted: &[f64], a: &[f64]) -> f64 {
    let n = sorted.len();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (sorted[n - 1 - i] - sorted[i]))
        .sum();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
    numerator * numerator / ss
}

/// Royston's normalizing transformation of 1 - W
fn pvalue(w: f64, n: usize) -> Result<f64> {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return Ok(1.0);
    }
    let y = w1.ln();

    let (z, m, s) = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return Ok(0.0);
        }
        (-(gamma - y).ln(), poly(&C3, nf), poly(&C4, nf).exp())
    } else {
        let ln_n = nf.ln();
        (y, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    Ok(standard_normal()?.sf((z - m) / s))
}
