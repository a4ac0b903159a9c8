//! Tabular dataset loading for the evaluation demos.
//!
//! The harness itself never touches raw text. This module turns a CSV file
//! into a numeric feature matrix plus a binary label vector; everything
//! non-numeric is filtered out before the data reaches any classifier.

mod loader;
mod table;

pub use loader::{DatasetLoadError, TabularDataset, dataset_from_table, load_csv_dataset};
pub use table::{Table, parse_csv};
