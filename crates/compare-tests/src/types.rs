//! Result types shared by every test

use compare_core::{Error, Result};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

/// Statistic and two-sided p-value of a hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestOutcome {
    /// Test statistic (W, F, H, t or U depending on the test)
    pub statistic: f64,
    /// p-value under the null hypothesis
    pub pvalue: f64,
}

impl TestOutcome {
    pub fn new(statistic: f64, pvalue: f64) -> Self {
        Self {
            statistic,
            pvalue: pvalue.clamp(0.0, 1.0),
        }
    }

    /// Whether the null hypothesis is rejected at level `alpha`
    pub fn rejects(&self, alpha: f64) -> bool {
        self.pvalue < alpha
    }
}

/// Square symmetric matrix of pairwise p-values, indexed by group position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymmetricMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SymmetricMatrix {
    /// Matrix of the given size with `diagonal` on the diagonal and NaN elsewhere
    pub fn new(size: usize, diagonal: f64) -> Self {
        let mut values = vec![f64::NAN; size * size];
        for i in 0..size {
            values[i * size + i] = diagonal;
        }
        Self { size, values }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    /// Set both `(i, j)` and `(j, i)`
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.size + j] = value;
        self.values[j * self.size + i] = value;
    }

    /// Pairs `(i, j)` with `i < j`, in row-major order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |i| ((i + 1)..self.size).map(move |j| (i, j)))
    }
}

// Distribution helpers. statrs only fails on invalid parameters, which
// callers have already ruled out; the error is still propagated.

fn dist_err(e: impl std::fmt::Display) -> Error {
    Error::Computation(format!("invalid distribution parameters: {e}"))
}

pub(crate) fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(dist_err)
}

/// Two-sided p-value of a Student t statistic
pub(crate) fn t_two_sided(t: f64, df: f64) -> Result<f64> {
    if t.is_infinite() {
        return Ok(0.0);
    }
    let dist = StudentsT::new(0.0, 1.0, df).map_err(dist_err)?;
    Ok(2.0 * dist.sf(t.abs()))
}

/// Upper-tail p-value of an F statistic
pub(crate) fn f_upper(f: f64, df1: f64, df2: f64) -> Result<f64> {
    if f.is_infinite() {
        return Ok(0.0);
    }
    let dist = FisherSnedecor::new(df1, df2).map_err(dist_err)?;
    Ok(dist.sf(f))
}

/// Upper-tail p-value of a chi-squared statistic
pub(crate) fn chi2_upper(x: f64, df: f64) -> Result<f64> {
    let dist = ChiSquared::new(df).map_err(dist_err)?;
    Ok(dist.sf(x))
}
