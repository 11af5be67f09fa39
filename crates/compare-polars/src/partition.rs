//! Splitting a DataFrame into per-group samples

use crate::result::GroupSummary;
use crate::{Error, Result};
use ordered_float::OrderedFloat;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Row positions of every group of a grouping column, in ascending group order
///
/// Numeric grouping columns are ordered numerically, everything else
/// lexicographically by its string form. Rows with a null group are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupIndex {
    column: String,
    height: usize,
    labels: Vec<String>,
    rows: Vec<Vec<usize>>,
}

impl GroupIndex {
    /// Index the groups of `group_column`, which must hold at least two distinct values
    pub fn new(df: &DataFrame, group_column: &str) -> Result<Self> {
        let column = df.column(group_column).map_err(|_| {
            Error::InvalidConfiguration(format!("group column '{group_column}' not found"))
        })?;

        let (labels, rows) = match column.dtype() {
            DataType::Float64 | DataType::Float32 => {
                let cast = column.cast(&DataType::Float64)?;
                index_by(cast.f64()?.into_iter().map(|v| v.map(OrderedFloat)), |v| {
                    v.0.to_string()
                })
            }
            DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8 => {
                let cast = column.cast(&DataType::Int64)?;
                index_by(cast.i64()?.into_iter(), |v| v.to_string())
            }
            DataType::Boolean => index_by(column.bool()?.into_iter(), |v| v.to_string()),
            _ => {
                let cast = column.cast(&DataType::String)?;
                index_by(cast.str()?.into_iter(), |v| v.to_string())
            }
        };

        if labels.len() < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "group column '{group_column}' needs at least 2 distinct values, found {}",
                labels.len()
            )));
        }

        Ok(Self {
            column: group_column.to_string(),
            height: df.height(),
            labels,
            rows,
        })
    }

    /// Name of the grouping column
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Split `metric` into one sample per group
    ///
    /// Null values are dropped; a NaN or infinite value is a configuration
    /// error, as is a group left without observations.
    pub fn partition(&self, df: &DataFrame, metric: &str) -> Result<GroupedSamples> {
        if df.height() != self.height {
            return Err(Error::InvalidConfiguration(format!(
                "group index built for {} rows, DataFrame has {}",
                self.height,
                df.height()
            )));
        }
        let values = metric_values(df, metric)?;

        let samples = self
            .labels
            .iter()
            .zip(&self.rows)
            .map(|(label, rows)| {
                let sample: Vec<f64> = rows.iter().filter_map(|&row| values[row]).collect();
                if let Some(bad) = sample.iter().find(|v| !v.is_finite()) {
                    return Err(Error::InvalidConfiguration(format!(
                        "metric '{metric}' has non-finite value {bad} in group '{label}'"
                    )));
                }
                if sample.is_empty() {
                    return Err(Error::InsufficientData {
                        metric: metric.to_string(),
                        group: label.clone(),
                        expected: 1,
                        actual: 0,
                    });
                }
                Ok(sample)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(GroupedSamples {
            metric: metric.to_string(),
            labels: self.labels.clone(),
            samples,
        })
    }
}

fn index_by<K: Ord>(
    keys: impl Iterator<Item = Option<K>>,
    render: impl Fn(&K) -> String,
) -> (Vec<String>, Vec<Vec<usize>>) {
    let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (row, key) in keys.enumerate() {
        if let Some(key) = key {
            groups.entry(key).or_default().push(row);
        }
    }
    groups
        .into_iter()
        .map(|(key, rows)| (render(&key), rows))
        .unzip()
}

/// Values of a numeric metric column as `f64`, nulls kept in place
fn metric_values(df: &DataFrame, metric: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(metric)
        .map_err(|_| Error::InvalidConfiguration(format!("metric column '{metric}' not found")))?;

    let values = match column.dtype() {
        DataType::Float64 => column.f64()?.into_iter().collect(),
        DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt64
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8 => {
            // Convert to f64 for computation
            let float_column = column.cast(&DataType::Float64)?;
            float_column.f64()?.into_iter().collect()
        }
        dt => {
            return Err(Error::InvalidConfiguration(format!(
                "metric column '{metric}' must be numeric, got {dt:?}"
            )));
        }
    };
    Ok(values)
}

/// One metric split into samples, in group order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSamples {
    metric: String,
    labels: Vec<String>,
    samples: Vec<Vec<f64>>,
}

impl GroupedSamples {
    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrowed samples, the shape every test primitive takes
    pub fn slices(&self) -> Vec<&[f64]> {
        self.samples.iter().map(Vec::as_slice).collect()
    }

    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.labels
            .iter()
            .zip(&self.samples)
            .map(|(label, sample)| GroupSummary {
                label: label.clone(),
                size: sample.len(),
            })
            .collect()
    }

    /// All group labels joined, for errors raised by multi-group tests
    pub(crate) fn scope(&self) -> String {
        self.labels.join(", ")
    }

    pub(crate) fn pair_scope(&self, i: usize, j: usize) -> String {
        format!("{}, {}", self.labels[i], self.labels[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_groups_sort_numerically() {
        let df = df![
            "dose" => [10i64, 2, 10, 2, 1],
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0],
        ]
        .unwrap();
        let index = GroupIndex::new(&df, "dose").unwrap();
        assert_eq!(index.labels(), ["1", "2", "10"]);

        let samples = index.partition(&df, "value").unwrap();
        assert_eq!(samples.samples(), [vec![5.0], vec![2.0, 4.0], vec![1.0, 3.0]]);
        assert_eq!(samples.scope(), "1, 2, 10");
    }

    #[test]
    fn test_string_groups_sort_lexicographically() {
        let df = df![
            "arm" => ["b", "a", "b", "c"],
            "value" => [1i32, 2, 3, 4],
        ]
        .unwrap();
        let samples = GroupIndex::new(&df, "arm")
            .unwrap()
            .partition(&df, "value")
            .unwrap();
        assert_eq!(samples.labels(), ["a", "b", "c"]);
        assert_eq!(samples.samples()[1], vec![1.0, 3.0]);
    }

    #[test]
    fn test_null_labels_and_values_are_dropped() {
        let df = df![
            "arm" => [Some("a"), None, Some("b"), Some("a")],
            "value" => [Some(1.0), Some(9.0), Some(2.0), None],
        ]
        .unwrap();
        let samples = GroupIndex::new(&df, "arm")
            .unwrap()
            .partition(&df, "value")
            .unwrap();
        assert_eq!(samples.samples(), [vec![1.0], vec![2.0]]);
        let sizes: Vec<usize> = samples.summaries().iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![1, 1]);
    }

    #[test]
    fn test_single_group_rejected() {
        let df = df!["arm" => ["a", "a"], "value" => [1.0, 2.0]].unwrap();
        assert!(matches!(
            GroupIndex::new(&df, "arm"),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_non_finite_value_names_group() {
        let df = df!["arm" => ["a", "b"], "value" => [1.0, f64::NAN]].unwrap();
        let err = GroupIndex::new(&df, "arm")
            .unwrap()
            .partition(&df, "value")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'value'") && message.contains("'b'"), "{message}");
    }

    #[test]
    fn test_non_numeric_metric_rejected() {
        let df = df!["arm" => ["a", "b"], "name" => ["x", "y"]].unwrap();
        let index = GroupIndex::new(&df, "arm").unwrap();
        assert!(matches!(
            index.partition(&df, "name"),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            index.partition(&df, "missing"),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
