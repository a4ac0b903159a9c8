//! Single-split logistic-regression report: confusion matrix, per-class
//! precision/recall and ROC AUC on one held-out set.

use std::path::PathBuf;

use clfeval::dataset::load_csv_dataset;
use clfeval::eval::train_test_split;
use clfeval::logging;
use clfeval::ml::logreg::{TrainOptions, train_logreg};
use clfeval::ml::metrics::{
    ConfusionMatrix, average_precision, pr_curve, precision_recall_by_class, roc_auc,
};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    csv_path: PathBuf,
    label_column: String,
    test_fraction: f64,
    seed: u64,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let dataset =
        load_csv_dataset(&options.csv_path, &options.label_column).map_err(|err| err.to_string())?;

    let split = train_test_split(dataset.len(), options.test_fraction, options.seed)
        .map_err(|err| err.to_string())?;
    let train_x: Vec<Vec<f32>> = split.train.iter().map(|&row| dataset.x[row].clone()).collect();
    let train_y: Vec<u8> = split.train.iter().map(|&row| dataset.y[row]).collect();
    let test_x: Vec<Vec<f32>> = split.test.iter().map(|&row| dataset.x[row].clone()).collect();
    let test_y: Vec<u8> = split.test.iter().map(|&row| dataset.y[row]).collect();

    let model = train_logreg(
        &train_x,
        &train_y,
        &TrainOptions {
            seed: options.seed,
            ..TrainOptions::default()
        },
    )?;
    let predicted = model.predict(&test_x);
    let scores = model.predict_scores(&test_x);

    let cm = ConfusionMatrix::from_labels(&test_y, &predicted);
    println!("accuracy:      {:.4}", cm.accuracy());
    println!("roc auc:       {:.4}", roc_auc(&test_y, &scores));
    println!("avg precision: {:.4}", average_precision(&test_y, &scores));
    println!();
    println!("confusion matrix (rows=true, cols=pred):");
    println!("{:>12}{:>8}{:>8}", "", dataset.label_values[0], dataset.label_values[1]);
    println!("{:>12}{:>8}{:>8}", dataset.label_values[0], cm.tn, cm.fp);
    println!("{:>12}{:>8}{:>8}", dataset.label_values[1], cm.fn_, cm.tp);
    println!();

    let per_class = precision_recall_by_class(&cm);
    for (idx, stats) in per_class.iter().enumerate() {
        println!(
            "class {:<10}  precision={:.3}  recall={:.3}  support={}",
            dataset.label_values[idx], stats.precision, stats.recall, stats.support
        );
    }

    println!();
    println!("precision-recall curve:");
    println!("{:>8}  {:>9}", "recall", "precision");
    for point in pr_curve(&test_y, &scores) {
        println!("{:>8.4}  {:>9.4}", point.recall, point.precision);
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut csv_path: Option<PathBuf> = None;
    let mut label_column = "label".to_string();
    let mut test_fraction = 0.3f64;
    let mut seed = 42u64;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--csv" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--csv requires a value".to_string())?;
                csv_path = Some(PathBuf::from(value));
            }
            "--label" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--label requires a value".to_string())?;
                label_column = value.to_string();
            }
            "--test-fraction" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--test-fraction requires a value".to_string())?;
                test_fraction = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid --test-fraction value: {value}"))?;
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid --seed value: {value}"))?;
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let csv_path = csv_path.ok_or_else(|| "--csv is required".to_string())?;
    Ok(CliOptions {
        csv_path,
        label_column,
        test_fraction,
        seed,
    })
}

fn help_text() -> String {
    [
        "clfeval-report",
        "",
        "Usage:",
        "  clfeval-report --csv <dataset.csv> [options]",
        "",
        "Options:",
        "  --label <name>         Binary label column (default: label).",
        "  --test-fraction <f>    Held-out fraction in (0, 1) (default: 0.3).",
        "  --seed <n>             Split and init seed (default: 42).",
    ]
    .join("\n")
}
