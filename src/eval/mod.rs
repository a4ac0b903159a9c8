//! Repeated train/test evaluation of a classifier.
//!
//! The entry point is [`Harness`]: for a fixed number of trials it draws an
//! independent seeded split, fits a fresh classifier, predicts on the held-out
//! rows and records accuracy, F1 and a prediction-stability statistic.
//! [`summarize`] reduces the trial sequence to per-metric means.

mod harness;
mod split;
mod summary;

pub use harness::{EvalError, EvalOptions, Harness, RunState, TrialResult, run_repeated_eval};
pub use split::{Split, train_test_split, validate_split_params};
pub use summary::{Summary, summarize};
