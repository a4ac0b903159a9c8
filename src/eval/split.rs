use rand::rngs::StdRng;
use rand::{SeedableRng, seq::SliceRandom};

use super::harness::EvalError;

/// Disjoint partition of row indices into a train and a test subset.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Row indices used for fitting.
    pub train: Vec<usize>,
    /// Held-out row indices used for prediction.
    pub test: Vec<usize>,
}

/// Check that a split is possible before any trial runs.
pub fn validate_split_params(rows: usize, test_fraction: f64) -> Result<(), EvalError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(EvalError::InvalidTestFraction(test_fraction));
    }
    if rows < 2 {
        return Err(EvalError::TooFewRows(rows));
    }
    Ok(())
}

/// Partition `0..rows` into disjoint train/test subsets keyed by `seed`.
///
/// The test subset takes `ceil(rows * test_fraction)` indices, clamped so
/// neither side is empty. The same seed always reproduces the same partition.
pub fn train_test_split(rows: usize, test_fraction: f64, seed: u64) -> Result<Split, EvalError> {
    validate_split_params(rows, test_fraction)?;

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((rows as f64 * test_fraction).ceil() as usize).clamp(1, rows - 1);
    let train = indices.split_off(test_len);
    Ok(Split {
        train,
        test: indices,
    })
}
