//! Machine learning building blocks for the evaluation demos.
//!
//! Models are implemented directly on `Vec<Vec<f32>>` matrices so the harness
//! stays free of heavyweight dependencies and every fit is reproducible.

mod classifier;
pub mod logreg;
pub mod metrics;
pub mod tree;

pub use classifier::Classifier;
