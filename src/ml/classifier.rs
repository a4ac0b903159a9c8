/// Capability interface for supervised binary classifiers.
///
/// The evaluation harness only depends on this trait, so any model can be
/// substituted for the decision tree without touching the trial loop.
pub trait Classifier {
    /// Fit the model on a feature matrix and aligned binary labels.
    fn fit(&mut self, x: &[Vec<f32>], y: &[u8]) -> Result<(), String>;

    /// Predict a binary label for each row. Must only be called after a
    /// successful [`fit`](Classifier::fit).
    fn predict(&self, x: &[Vec<f32>]) -> Vec<u8>;
}
