//! Library exports for reuse in binaries and tests.
/// Tabular dataset loading.
pub mod dataset;
/// Repeated train/test evaluation harness.
pub mod eval;
/// Logging setup.
pub mod logging;
/// Classifier implementations and metrics.
pub mod ml;
/// Result reporting sinks.
pub mod report;
