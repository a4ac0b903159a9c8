use serde::{Deserialize, Serialize};

use super::harness::{EvalError, TrialResult};

/// Per-metric means over a completed trial sequence, plus advisory prose.
///
/// Derived on demand from the trial results; nothing here feeds back into any
/// other component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of trials aggregated.
    pub trials: usize,
    pub mean_accuracy: f32,
    pub mean_f1: f32,
    pub mean_stability: f32,
    /// Human-readable interpretation of the three means.
    pub interpretation: String,
}

/// Reduce a trial sequence to its [`Summary`].
///
/// Fails with [`EvalError::EmptyResults`] when no trials completed, since the
/// means are undefined.
pub fn summarize(results: &[TrialResult]) -> Result<Summary, EvalError> {
    if results.is_empty() {
        return Err(EvalError::EmptyResults);
    }
    let count = results.len() as f32;
    let mean_accuracy = results.iter().map(|r| r.accuracy).sum::<f32>() / count;
    let mean_f1 = results.iter().map(|r| r.f1).sum::<f32>() / count;
    let mean_stability = results.iter().map(|r| r.stability).sum::<f32>() / count;

    Ok(Summary {
        trials: results.len(),
        mean_accuracy,
        mean_f1,
        mean_stability,
        interpretation: interpretation_text(results.len(), mean_accuracy, mean_f1, mean_stability),
    })
}

/// Deterministic prose rendering of the three means.
fn interpretation_text(trials: usize, accuracy: f32, f1: f32, stability: f32) -> String {
    format!(
        "Evaluation over {trials} randomized train/test runs:\n\
         \n\
         - Mean accuracy: {accuracy:.4}\n\
         \x20 The model classified about {:.2}% of held-out rows correctly.\n\
         \n\
         - Mean F1 score: {f1:.4}\n\
         \x20 Balance of precision and recall for the positive class; most\n\
         \x20 informative when the classes are imbalanced.\n\
         \n\
         - Mean prediction z-score: {stability:.4}\n\
         \x20 Dispersion of the predicted labels around their own mean. Lower\n\
         \x20 values suggest steadier predictions from run to run.\n\
         \n\
         High accuracy and F1 together with a low z-score indicate a reliable,\n\
         consistent model. Large swings across runs usually mean the model is\n\
         sensitive to how the data was split.",
        accuracy * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(trial: usize, accuracy: f32, f1: f32, stability: f32) -> TrialResult {
        TrialResult {
            trial,
            accuracy,
            f1,
            stability,
        }
    }

    #[test]
    fn empty_results_are_rejected() {
        assert!(matches!(summarize(&[]), Err(EvalError::EmptyResults)));
    }

    #[test]
    fn mean_over_identical_trials_is_that_value() {
        let results = vec![result(0, 0.9, 0.8, 0.4); 5];
        let summary = summarize(&results).unwrap();
        assert_eq!(summary.trials, 5);
        assert!((summary.mean_accuracy - 0.9).abs() < 1e-6);
        assert!((summary.mean_f1 - 0.8).abs() < 1e-6);
        assert!((summary.mean_stability - 0.4).abs() < 1e-6);
    }

    #[test]
    fn means_average_across_trials() {
        let results = vec![result(0, 1.0, 1.0, 0.0), result(1, 0.5, 0.0, 1.0)];
        let summary = summarize(&results).unwrap();
        assert!((summary.mean_accuracy - 0.75).abs() < 1e-6);
        assert!((summary.mean_f1 - 0.5).abs() < 1e-6);
        assert!((summary.mean_stability - 0.5).abs() < 1e-6);
    }

    #[test]
    fn interpretation_is_a_deterministic_function_of_the_means() {
        let results = vec![result(0, 0.9, 0.8, 0.4); 3];
        let a = summarize(&results).unwrap();
        let b = summarize(&results).unwrap();
        assert_eq!(a, b);
        assert!(a.interpretation.contains("0.9000"));
        assert!(a.interpretation.contains("0.8000"));
        assert!(a.interpretation.contains("0.4000"));
        assert!(a.interpretation.contains("3 randomized train/test runs"));
    }
}
