//! Square matrices of pairwise results indexed by group label

use crate::Result;
use compare_core::PValueBound;
use polars::prelude::*;
use serde::Serialize;

/// Group-by-group matrix with possibly absent cells
///
/// Rows and columns follow the sorted group order of [`GroupIndex`], not the
/// order in which labels first appear in the table, so the lower triangle
/// always holds the pairs whose row label sorts after the column label.
/// Absent cells export as null.
///
/// [`GroupIndex`]: crate::GroupIndex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairMatrix<T> {
    labels: Vec<String>,
    cells: Vec<Option<T>>,
}

impl<T> PairMatrix<T> {
    /// Matrix with every cell absent
    pub fn empty(labels: Vec<String>) -> Self {
        let size = labels.len();
        Self {
            labels,
            cells: (0..size * size).map(|_| None).collect(),
        }
    }

    /// Matrix whose cell `(row, col)` is `cell(row, col)`
    pub fn from_fn(labels: Vec<String>, mut cell: impl FnMut(usize, usize) -> Option<T>) -> Self {
        let size = labels.len();
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .map(|(row, col)| cell(row, col))
            .collect();
        Self { labels, cells }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.cells.get(row * self.size() + col)?.as_ref()
    }

    /// Cell by group labels
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<&T> {
        let row = self.position(row)?;
        let col = self.position(col)?;
        self.get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let size = self.size();
        self.cells[row * size + col] = Some(value);
    }

    /// Present cells as `(row label, column label, value)`, row-major
    pub fn present(&self) -> impl Iterator<Item = (&str, &str, &T)> + '_ {
        let size = self.size();
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref().map(|value| {
                (
                    self.labels[idx / size].as_str(),
                    self.labels[idx % size].as_str(),
                    value,
                )
            })
        })
    }

    /// Number of present cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// DataFrame with a leading `group` column and one column per group
    fn frame_with(&self, column: impl Fn(&str, Vec<Option<&T>>) -> Series) -> Result<DataFrame> {
        let size = self.size();
        let mut columns: Vec<Column> = Vec::with_capacity(size + 1);
        columns.push(Series::new(PlSmallStr::from("group"), self.labels.clone()).into());
        for (col, label) in self.labels.iter().enumerate() {
            let cells = (0..size).map(|row| self.get(row, col)).collect();
            columns.push(column(label, cells).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl PairMatrix<f64> {
    /// Export as a DataFrame of `f64` columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        self.frame_with(|label, cells| {
            let values: Vec<Option<f64>> = cells.into_iter().map(|c| c.copied()).collect();
            Series::new(label.into(), values)
        })
    }
}

impl PairMatrix<PValueBound> {
    /// Export as a DataFrame of string columns such as `<1e-3`
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        self.frame_with(|label, cells| {
            let values: Vec<Option<String>> =
                cells.into_iter().map(|c| c.map(|b| b.to_string())).collect();
            Series::new(label.into(), values)
        })
    }
}
