use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::split::{train_test_split, validate_split_params};
use crate::ml::Classifier;
use crate::ml::metrics::{accuracy_score, f1_score, mean_abs_zscore};

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("feature matrix has {rows} rows but the label vector has {labels}")]
    DataShape { rows: usize, labels: usize },
    #[error("no numeric feature columns remain after filtering")]
    EmptyFeatureSet,
    #[error("test fraction {0} is outside (0, 1)")]
    InvalidTestFraction(f64),
    #[error("dataset has {0} rows; at least 2 are needed to split")]
    TooFewRows(usize),
    #[error("trial {trial} failed: {message}")]
    Trial { trial: usize, message: String },
    #[error("no trial results to aggregate")]
    EmptyResults,
}

/// Options for a repeated evaluation run.
///
/// Defaults match the reference study: 50 trials at a 0.3 test fraction.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    /// Number of trials; trial `k` uses seed `k`.
    pub trials: usize,
    /// Held-out fraction for every split, in (0, 1).
    pub test_fraction: f64,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            trials: 50,
            test_fraction: 0.3,
        }
    }
}

/// Metrics of a single completed trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Trial index, equal to the split/fit seed.
    pub trial: usize,
    /// Fraction of held-out rows predicted correctly.
    pub accuracy: f32,
    /// Positive-class F1 on the held-out rows.
    pub f1: f32,
    /// Mean absolute z-score of the predicted labels.
    pub stability: f32,
}

/// Lifecycle of a [`Harness`]. `Failed` is terminal; a new run starts from a
/// fresh harness value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No trial has run yet.
    Idle,
    /// `completed` trials finished, more remain.
    Running { completed: usize },
    /// All trials finished; results are complete.
    Complete,
    /// A trial failed; no further trials will run.
    Failed { trial: usize },
}

/// Repeated-evaluation state machine.
///
/// Constructing the harness validates everything that can fail structurally
/// (shapes, feature count, fraction), so every error after that point carries
/// the index of the trial that produced it. The borrowed dataset is never
/// mutated; each trial works on its own gathered train/test copies.
pub struct Harness<'d, C, F>
where
    C: Classifier,
    F: FnMut(u64) -> C,
{
    x: &'d [Vec<f32>],
    y: &'d [u8],
    options: EvalOptions,
    make_classifier: F,
    results: Vec<TrialResult>,
    state: RunState,
}

impl<'d, C, F> Harness<'d, C, F>
where
    C: Classifier,
    F: FnMut(u64) -> C,
{
    /// Validate the dataset and options, returning an idle harness.
    ///
    /// `make_classifier` is called once per trial with the trial seed and must
    /// return a fresh classifier; nothing learned crosses trial boundaries.
    pub fn new(
        x: &'d [Vec<f32>],
        y: &'d [u8],
        options: EvalOptions,
        make_classifier: F,
    ) -> Result<Self, EvalError> {
        if x.len() != y.len() {
            return Err(EvalError::DataShape {
                rows: x.len(),
                labels: y.len(),
            });
        }
        if let Some(row) = x.first() {
            if row.is_empty() {
                return Err(EvalError::EmptyFeatureSet);
            }
        }
        validate_split_params(x.len(), options.test_fraction)?;

        Ok(Self {
            x,
            y,
            options,
            make_classifier,
            results: Vec::with_capacity(options.trials),
            state: RunState::Idle,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Trials completed so far, in trial order.
    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    /// Run the next trial.
    ///
    /// Returns `Ok(true)` when a trial ran and more remain, `Ok(false)` once
    /// the run is complete (or already terminal). A trial failure moves the
    /// harness to `Failed` and is returned with the trial index attached.
    pub fn step(&mut self) -> Result<bool, EvalError> {
        let trial = match self.state {
            RunState::Idle => 0,
            RunState::Running { completed } => completed,
            RunState::Complete | RunState::Failed { .. } => return Ok(false),
        };
        if trial >= self.options.trials {
            self.state = RunState::Complete;
            return Ok(false);
        }

        match self.run_trial(trial) {
            Ok(result) => {
                tracing::debug!(
                    trial,
                    accuracy = result.accuracy,
                    f1 = result.f1,
                    stability = result.stability,
                    "trial complete"
                );
                self.results.push(result);
                self.state = if trial + 1 == self.options.trials {
                    RunState::Complete
                } else {
                    RunState::Running {
                        completed: trial + 1,
                    }
                };
                Ok(self.state != RunState::Complete)
            }
            Err(message) => {
                self.state = RunState::Failed { trial };
                Err(EvalError::Trial { trial, message })
            }
        }
    }

    /// Drive the harness to completion and return the full trial sequence.
    pub fn run(mut self) -> Result<Vec<TrialResult>, EvalError> {
        tracing::info!(
            trials = self.options.trials,
            test_fraction = self.options.test_fraction,
            rows = self.x.len(),
            features = self.x.first().map(|row| row.len()).unwrap_or(0),
            "starting repeated evaluation"
        );
        while self.step()? {}
        tracing::info!(trials = self.results.len(), "repeated evaluation finished");
        Ok(self.results)
    }

    fn run_trial(&mut self, trial: usize) -> Result<TrialResult, String> {
        let seed = trial as u64;
        let split = train_test_split(self.x.len(), self.options.test_fraction, seed)
            .map_err(|err| err.to_string())?;

        let train_x: Vec<Vec<f32>> = split.train.iter().map(|&row| self.x[row].clone()).collect();
        let train_y: Vec<u8> = split.train.iter().map(|&row| self.y[row]).collect();
        let test_x: Vec<Vec<f32>> = split.test.iter().map(|&row| self.x[row].clone()).collect();
        let test_y: Vec<u8> = split.test.iter().map(|&row| self.y[row]).collect();

        let mut classifier = (self.make_classifier)(seed);
        classifier.fit(&train_x, &train_y)?;
        let predicted = classifier.predict(&test_x);
        if predicted.len() != test_y.len() {
            return Err(format!(
                "classifier returned {} predictions for {} held-out rows",
                predicted.len(),
                test_y.len()
            ));
        }

        Ok(TrialResult {
            trial,
            accuracy: accuracy_score(&test_y, &predicted),
            f1: f1_score(&test_y, &predicted),
            stability: mean_abs_zscore(&predicted),
        })
    }
}

/// Convenience wrapper: build a [`Harness`] and drive it to completion.
pub fn run_repeated_eval<C, F>(
    x: &[Vec<f32>],
    y: &[u8],
    options: EvalOptions,
    make_classifier: F,
) -> Result<Vec<TrialResult>, EvalError>
where
    C: Classifier,
    F: FnMut(u64) -> C,
{
    Harness::new(x, y, options, make_classifier)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Predicts from the first feature directly; perfect on datasets labeled
    /// the same way.
    struct ThresholdStub;

    impl Classifier for ThresholdStub {
        fn fit(&mut self, _x: &[Vec<f32>], _y: &[u8]) -> Result<(), String> {
            Ok(())
        }

        fn predict(&self, x: &[Vec<f32>]) -> Vec<u8> {
            x.iter().map(|row| u8::from(row[0] > 3.0)).collect()
        }
    }

    /// Always predicts the positive class.
    struct ConstantStub;

    impl Classifier for ConstantStub {
        fn fit(&mut self, _x: &[Vec<f32>], _y: &[u8]) -> Result<(), String> {
            Ok(())
        }

        fn predict(&self, x: &[Vec<f32>]) -> Vec<u8> {
            vec![1; x.len()]
        }
    }

    /// Fails to fit from a configured seed onward.
    struct FailingStub {
        fail_from: u64,
        seed: u64,
    }

    impl Classifier for FailingStub {
        fn fit(&mut self, _x: &[Vec<f32>], _y: &[u8]) -> Result<(), String> {
            if self.seed >= self.fail_from {
                Err("synthetic failure".to_string())
            } else {
                Ok(())
            }
        }

        fn predict(&self, x: &[Vec<f32>]) -> Vec<u8> {
            vec![0; x.len()]
        }
    }

    fn dataset(rows: usize) -> (Vec<Vec<f32>>, Vec<u8>) {
        let x: Vec<Vec<f32>> = (0..rows).map(|i| vec![i as f32, -(i as f32)]).collect();
        // Few enough negatives that no test split can miss the positive class.
        let y: Vec<u8> = (0..rows).map(|i| u8::from(i > 3)).collect();
        (x, y)
    }

    #[test]
    fn perfect_predictions_score_one() {
        let (x, y) = dataset(20);
        let options = EvalOptions {
            trials: 5,
            test_fraction: 0.3,
        };
        let results = run_repeated_eval(&x, &y, options, |_| ThresholdStub).unwrap();
        assert_eq!(results.len(), 5);
        for result in &results {
            assert_eq!(result.accuracy, 1.0);
            assert_eq!(result.f1, 1.0);
        }
    }

    #[test]
    fn constant_predictions_have_zero_stability() {
        let (x, y) = dataset(20);
        let options = EvalOptions {
            trials: 3,
            test_fraction: 0.3,
        };
        let results = run_repeated_eval(&x, &y, options, |_| ConstantStub).unwrap();
        for result in &results {
            assert_eq!(result.stability, 0.0);
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let (x, y) = dataset(40);
        let options = EvalOptions::default();
        let a = run_repeated_eval(&x, &y, options, |_| ThresholdStub).unwrap();
        let b = run_repeated_eval(&x, &y, options, |_| ThresholdStub).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn results_are_ordered_by_trial() {
        let (x, y) = dataset(20);
        let options = EvalOptions {
            trials: 8,
            test_fraction: 0.25,
        };
        let results = run_repeated_eval(&x, &y, options, |_| ThresholdStub).unwrap();
        let trials: Vec<usize> = results.iter().map(|r| r.trial).collect();
        assert_eq!(trials, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn state_machine_walks_idle_running_complete() {
        let (x, y) = dataset(20);
        let options = EvalOptions {
            trials: 2,
            test_fraction: 0.3,
        };
        let mut harness = Harness::new(&x, &y, options, |_| ThresholdStub).unwrap();
        assert_eq!(harness.state(), RunState::Idle);
        assert!(harness.step().unwrap());
        assert_eq!(harness.state(), RunState::Running { completed: 1 });
        assert!(!harness.step().unwrap());
        assert_eq!(harness.state(), RunState::Complete);
        assert_eq!(harness.results().len(), 2);
        // Stepping a complete harness is a no-op.
        assert!(!harness.step().unwrap());
    }

    #[test]
    fn failure_carries_the_trial_index_and_is_terminal() {
        let (x, y) = dataset(20);
        let options = EvalOptions {
            trials: 10,
            test_fraction: 0.3,
        };
        let mut harness = Harness::new(&x, &y, options, |seed| FailingStub {
            fail_from: 3,
            seed,
        })
        .unwrap();
        let err = loop {
            match harness.step() {
                Ok(true) => {}
                Ok(false) => panic!("run should fail"),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, EvalError::Trial { trial: 3, .. }));
        assert_eq!(harness.state(), RunState::Failed { trial: 3 });
        assert_eq!(harness.results().len(), 3);
        // Failed is terminal.
        assert!(!harness.step().unwrap());
        assert_eq!(harness.state(), RunState::Failed { trial: 3 });
    }

    #[test]
    fn shape_mismatch_is_rejected_before_any_trial() {
        let (x, _) = dataset(20);
        let y = vec![0u8; 19];
        let err = Harness::new(&x, &y, EvalOptions::default(), |_| ThresholdStub).err().unwrap();
        assert!(matches!(err, EvalError::DataShape { rows: 20, labels: 19 }));
    }

    #[test]
    fn empty_feature_set_is_rejected_before_any_trial() {
        let x: Vec<Vec<f32>> = vec![Vec::new(); 10];
        let y = vec![0u8; 10];
        let err = Harness::new(&x, &y, EvalOptions::default(), |_| ThresholdStub).err().unwrap();
        assert!(matches!(err, EvalError::EmptyFeatureSet));
    }

    #[test]
    fn invalid_fraction_is_rejected_before_any_trial() {
        let (x, y) = dataset(20);
        let options = EvalOptions {
            trials: 5,
            test_fraction: 1.0,
        };
        let err = Harness::new(&x, &y, options, |_| ThresholdStub).err().unwrap();
        assert!(matches!(err, EvalError::InvalidTestFraction(_)));
    }

    #[test]
    fn zero_trials_complete_immediately_with_no_results() {
        let (x, y) = dataset(20);
        let options = EvalOptions {
            trials: 0,
            test_fraction: 0.3,
        };
        let results = run_repeated_eval(&x, &y, options, |_| ThresholdStub).unwrap();
        assert!(results.is_empty());
    }
}
