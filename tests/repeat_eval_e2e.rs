//! End-to-end runs of the repeated-evaluation harness on synthetic data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use clfeval::dataset::{dataset_from_table, parse_csv};
use clfeval::eval::{EvalError, EvalOptions, Harness, run_repeated_eval, summarize};
use clfeval::ml::tree::GiniTreeClassifier;

/// 200 rows, 10 numeric features, binary label driven by the first two
/// features plus noise.
fn synthetic_dataset() -> (Vec<Vec<f32>>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut x = Vec::with_capacity(200);
    let mut y = Vec::with_capacity(200);
    for _ in 0..200 {
        let row: Vec<f32> = (0..10).map(|_| rng.random::<f32>() * 10.0).collect();
        let noise = rng.random::<f32>() - 0.5;
        let label = u8::from(row[0] + row[1] + noise > 10.0);
        x.push(row);
        y.push(label);
    }
    (x, y)
}

#[test]
fn fifty_trials_produce_fifty_results_with_sane_metrics() {
    let (x, y) = synthetic_dataset();
    let options = EvalOptions {
        trials: 50,
        test_fraction: 0.3,
    };
    let results =
        run_repeated_eval(&x, &y, options, |_| GiniTreeClassifier::default()).unwrap();
    assert_eq!(results.len(), 50);

    for result in &results {
        assert!((0.0..=1.0).contains(&result.accuracy));
        assert!((0.0..=1.0).contains(&result.f1));
        assert!(result.stability >= 0.0);
    }

    let summary = summarize(&results).unwrap();
    assert!((0.0..=1.0).contains(&summary.mean_accuracy));
    assert!((0.0..=1.0).contains(&summary.mean_f1));
    assert!(summary.mean_stability >= 0.0);
    // The signal is strong enough that the tree must beat coin flipping.
    assert!(summary.mean_accuracy > 0.7);
}

#[test]
fn repeated_runs_are_bit_for_bit_identical() {
    let (x, y) = synthetic_dataset();
    let options = EvalOptions {
        trials: 20,
        test_fraction: 0.3,
    };
    let a = run_repeated_eval(&x, &y, options, |_| GiniTreeClassifier::default()).unwrap();
    let b = run_repeated_eval(&x, &y, options, |_| GiniTreeClassifier::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn missing_label_column_fails_before_any_trial() {
    let table = parse_csv("a,b\n1,2\n3,4\n").unwrap();
    let err = dataset_from_table(&table, "spam").unwrap_err();
    assert!(err.to_string().contains("spam"));
}

#[test]
fn all_non_numeric_features_fail_with_empty_feature_set() {
    let table = parse_csv("sender,subject,label\nalice,hi,0\nbob,offer,1\ncarol,news,0\n").unwrap();
    let dataset = dataset_from_table(&table, "label").unwrap();
    assert!(dataset.feature_names.is_empty());

    let err = Harness::new(&dataset.x, &dataset.y, EvalOptions::default(), |_| {
        GiniTreeClassifier::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, EvalError::EmptyFeatureSet));
}

#[test]
fn csv_pipeline_runs_end_to_end() {
    let mut csv = String::from("f1,f2,note,label\n");
    let mut rng = StdRng::seed_from_u64(9);
    for i in 0..60 {
        let a: f32 = rng.random::<f32>() * 4.0 + if i % 2 == 0 { 0.0 } else { 6.0 };
        let b: f32 = rng.random::<f32>() * 2.0;
        csv.push_str(&format!("{a:.3},{b:.3},row{i},{}\n", i % 2));
    }

    let table = parse_csv(&csv).unwrap();
    let dataset = dataset_from_table(&table, "label").unwrap();
    assert_eq!(dataset.feature_names, vec!["f1", "f2"]);

    let options = EvalOptions {
        trials: 10,
        test_fraction: 0.3,
    };
    let results = run_repeated_eval(&dataset.x, &dataset.y, options, |_| {
        GiniTreeClassifier::default()
    })
    .unwrap();
    assert_eq!(results.len(), 10);
    let summary = summarize(&results).unwrap();
    assert!(summary.mean_accuracy > 0.8);
}
