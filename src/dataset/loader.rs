//! Loader turning raw CSV tables into harness-ready numeric datasets.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use super::table::{Table, parse_csv};

#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset is empty")]
    Empty,
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("label column '{0}' is not in the dataset")]
    MissingLabelColumn(String),
    #[error("label column '{column}' has {distinct} distinct values (expected 2)")]
    NonBinaryLabel { column: String, distinct: usize },
}

/// Fully prepared dataset: numeric features plus a binarized label vector.
///
/// Read-only for the remainder of a run; the harness borrows it and never
/// mutates it.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    /// Names of the numeric feature columns, in file order.
    pub feature_names: Vec<String>,
    /// Feature matrix, row-major, aligned with `feature_names`.
    pub x: Vec<Vec<f32>>,
    /// Binary labels aligned with `x`.
    pub y: Vec<u8>,
    /// Raw label values mapped to 0 and 1 respectively.
    pub label_values: [String; 2],
}

impl TabularDataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Load a CSV file and prepare it for evaluation.
pub fn load_csv_dataset(path: &Path, label_column: &str) -> Result<TabularDataset, DatasetLoadError> {
    let text = std::fs::read_to_string(path)?;
    let table = parse_csv(&text)?;
    dataset_from_table(&table, label_column)
}

/// Prepare an already parsed table for evaluation.
///
/// The label column must exist and hold exactly two distinct values; they are
/// binarized to {0, 1} in sorted order of the raw strings, so `0/1`, `ham/spam`
/// and `no/yes` all put the natural positive class at 1. Every other column is
/// kept as a feature only if all of its values parse as `f32`; the dataset may
/// legitimately end up with zero feature columns, which the harness rejects
/// before running any trial.
pub fn dataset_from_table(table: &Table, label_column: &str) -> Result<TabularDataset, DatasetLoadError> {
    let label_idx = table
        .column_index(label_column)
        .ok_or_else(|| DatasetLoadError::MissingLabelColumn(label_column.to_string()))?;

    let distinct: BTreeSet<&str> = table.column_values(label_idx).collect();
    if distinct.len() != 2 {
        return Err(DatasetLoadError::NonBinaryLabel {
            column: label_column.to_string(),
            distinct: distinct.len(),
        });
    }
    let label_values: Vec<&str> = distinct.into_iter().collect();
    let positive = label_values[1];

    let numeric_columns: Vec<usize> = (0..table.columns.len())
        .filter(|&idx| idx != label_idx && is_numeric_column(table, idx))
        .collect();

    let mut x = Vec::with_capacity(table.rows.len());
    let mut y = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let features: Vec<f32> = numeric_columns
            .iter()
            .map(|&idx| row[idx].parse::<f32>().unwrap_or(0.0))
            .collect();
        x.push(features);
        y.push(u8::from(row[label_idx] == positive));
    }

    Ok(TabularDataset {
        feature_names: numeric_columns
            .iter()
            .map(|&idx| table.columns[idx].clone())
            .collect(),
        x,
        y,
        label_values: [label_values[0].to_string(), label_values[1].to_string()],
    })
}

fn is_numeric_column(table: &Table, index: usize) -> bool {
    table
        .column_values(index)
        .all(|value| value.parse::<f32>().is_ok())
}
