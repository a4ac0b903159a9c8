//! Binary logistic regression trained by seeded minibatch SGD.
//!
//! Used by the single-split report demo; `predict_proba` exposes the positive
//! class probability needed for ROC analysis.

mod train;

pub use train::{TrainOptions, train_logreg};

use serde::{Deserialize, Serialize};

use crate::ml::Classifier;

/// Trained binary logistic regression model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRegModel {
    /// Model format version.
    pub model_version: i64,
    /// Number of `f32` values expected per feature row.
    pub feature_len: usize,
    /// One weight per feature.
    pub weights: Vec<f32>,
    /// Intercept term.
    pub bias: f32,
}

impl LogRegModel {
    /// Positive-class probability for one feature row.
    pub fn predict_proba(&self, features: &[f32]) -> f32 {
        let mut sum = self.bias;
        for (weight, &value) in self.weights.iter().zip(features) {
            sum += weight * value;
        }
        sigmoid(sum)
    }

    /// Hard label for one feature row (threshold 0.5).
    pub fn predict_row(&self, features: &[f32]) -> u8 {
        u8::from(self.predict_proba(features) >= 0.5)
    }

    /// Hard labels for every row of a feature matrix.
    pub fn predict(&self, x: &[Vec<f32>]) -> Vec<u8> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Positive-class probabilities for every row of a feature matrix.
    pub fn predict_scores(&self, x: &[Vec<f32>]) -> Vec<f32> {
        x.iter().map(|row| self.predict_proba(row)).collect()
    }
}

/// Numerically safe logistic function.
pub fn sigmoid(raw: f32) -> f32 {
    if raw >= 0.0 {
        1.0 / (1.0 + (-raw).exp())
    } else {
        let e = raw.exp();
        e / (1.0 + e)
    }
}

/// [`Classifier`] wrapper so the harness can evaluate logistic regression in
/// place of the decision tree.
#[derive(Debug, Clone, Default)]
pub struct LogRegClassifier {
    options: TrainOptions,
    model: Option<LogRegModel>,
}

impl LogRegClassifier {
    pub fn new(options: TrainOptions) -> Self {
        Self {
            options,
            model: None,
        }
    }

    pub fn model(&self) -> Option<&LogRegModel> {
        self.model.as_ref()
    }
}

impl Classifier for LogRegClassifier {
    fn fit(&mut self, x: &[Vec<f32>], y: &[u8]) -> Result<(), String> {
        self.model = Some(train_logreg(x, y, &self.options)?);
        Ok(())
    }

    fn predict(&self, x: &[Vec<f32>]) -> Vec<u8> {
        match &self.model {
            Some(model) => model.predict(x),
            None => Vec::new(),
        }
    }
}
