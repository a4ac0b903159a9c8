use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};

use super::{LogRegModel, sigmoid};

/// Training options for binary logistic regression.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 100,
            learning_rate: 0.1,
            l2: 1e-4,
            batch_size: 32,
            seed: 42,
        }
    }
}

/// Train a binary logistic regression with minibatch gradient descent.
///
/// Weight initialization and epoch shuffling both derive from
/// `options.seed`, so a fit is reproducible for fixed inputs.
pub fn train_logreg(x: &[Vec<f32>], y: &[u8], options: &TrainOptions) -> Result<LogRegModel, String> {
    if x.is_empty() || y.is_empty() {
        return Err("Empty training set".to_string());
    }
    if x.len() != y.len() {
        return Err("Mismatched training inputs/labels".to_string());
    }
    let dim = x[0].len();
    if dim == 0 {
        return Err("No feature columns to train on".to_string());
    }
    for row in x {
        if row.len() != dim {
            return Err("Inconsistent feature row length".to_string());
        }
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut weights = vec![0.0f32; dim];
    let mut bias = 0.0f32;
    for w in &mut weights {
        *w = (rng.random::<f32>() - 0.5) * 0.01;
    }

    let mut indices: Vec<usize> = (0..x.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let l2 = options.l2.max(0.0);

    for _epoch in 0..options.epochs {
        indices.shuffle(&mut rng);
        for chunk in indices.chunks(batch_size) {
            let mut grad_w = vec![0.0f32; dim];
            let mut grad_b = 0.0f32;
            for &idx in chunk {
                let row = &x[idx];
                let mut logit = bias;
                for (weight, &value) in weights.iter().zip(row) {
                    logit += weight * value;
                }
                let error = sigmoid(logit) - f32::from(y[idx] != 0);
                for (grad, &value) in grad_w.iter_mut().zip(row) {
                    *grad += error * value;
                }
                grad_b += error;
            }
            let scale = lr / chunk.len() as f32;
            for (weight, grad) in weights.iter_mut().zip(&grad_w) {
                *weight -= scale * grad + lr * l2 * *weight;
            }
            bias -= scale * grad_b;
        }
    }

    Ok(LogRegModel {
        model_version: 1,
        feature_len: dim,
        weights,
        bias,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<Vec<f32>>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..20 {
            let offset = i as f32 * 0.01;
            x.push(vec![-1.0 - offset, 0.3]);
            y.push(0);
            x.push(vec![1.0 + offset, -0.3]);
            y.push(1);
        }
        (x, y)
    }

    #[test]
    fn learns_a_separable_problem() {
        let (x, y) = separable();
        let model = train_logreg(&x, &y, &TrainOptions::default()).unwrap();
        assert_eq!(model.predict(&x), y);
    }

    #[test]
    fn training_is_reproducible_for_a_fixed_seed() {
        let (x, y) = separable();
        let a = train_logreg(&x, &y, &TrainOptions::default()).unwrap();
        let b = train_logreg(&x, &y, &TrainOptions::default()).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias, b.bias);
    }

    #[test]
    fn rejects_bad_shapes() {
        let err = train_logreg(&[], &[], &TrainOptions::default()).unwrap_err();
        assert!(err.contains("Empty"));
        let err = train_logreg(&[vec![1.0]], &[0, 1], &TrainOptions::default()).unwrap_err();
        assert!(err.contains("Mismatched"));
    }
}
