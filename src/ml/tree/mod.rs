//! Deterministic CART decision-tree classifier with Gini impurity splitting.
//!
//! The tree is grown directly on `f32` feature rows without external ML
//! dependencies. Splits are searched feature-by-feature in order and ties are
//! broken toward the first candidate, so a fit is a pure function of its
//! inputs and needs no RNG to be reproducible.

mod model;
mod train;

pub use model::{DecisionTreeModel, TreeNode};
pub use train::{TrainOptions, train_tree};

use crate::ml::Classifier;

/// [`Classifier`] wrapper around the Gini-criterion decision tree.
///
/// One instance is meant to live for a single trial: a fresh value is
/// constructed, fit once, and discarded with its learned thresholds.
#[derive(Debug, Clone, Default)]
pub struct GiniTreeClassifier {
    options: TrainOptions,
    model: Option<DecisionTreeModel>,
}

impl GiniTreeClassifier {
    pub fn new(options: TrainOptions) -> Self {
        Self {
            options,
            model: None,
        }
    }

    /// Borrow the trained model, if any.
    pub fn model(&self) -> Option<&DecisionTreeModel> {
        self.model.as_ref()
    }
}

impl Classifier for GiniTreeClassifier {
    fn fit(&mut self, x: &[Vec<f32>], y: &[u8]) -> Result<(), String> {
        self.model = Some(train_tree(x, y, &self.options)?);
        Ok(())
    }

    fn predict(&self, x: &[Vec<f32>]) -> Vec<u8> {
        match &self.model {
            Some(model) => model.predict(x),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_fits_and_predicts_through_the_trait() {
        let x = vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]];
        let y = vec![0, 0, 1, 1];
        let mut clf = GiniTreeClassifier::default();
        clf.fit(&x, &y).unwrap();
        assert_eq!(clf.predict(&x), y);
        assert!(clf.model().is_some());
    }

    #[test]
    fn predict_before_fit_is_empty() {
        let clf = GiniTreeClassifier::default();
        assert!(clf.predict(&[vec![1.0]]).is_empty());
    }
}
