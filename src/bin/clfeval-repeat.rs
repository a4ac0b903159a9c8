//! Repeated evaluation demo: train a Gini decision tree across many seeded
//! train/test splits and report per-trial metrics plus their means.

use std::path::PathBuf;

use clfeval::dataset::load_csv_dataset;
use clfeval::eval::{EvalOptions, run_repeated_eval, summarize};
use clfeval::logging;
use clfeval::ml::tree::GiniTreeClassifier;
use clfeval::report::{ReportSink, TextReport};

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
    trials: usize,
    test_fraction: f64,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let dataset =
        load_csv_dataset(&options.csv_path, &options.label_column).map_err(|err| err.to_string())?;
    tracing::info!(
        rows = dataset.len(),
        features = dataset.feature_names.len(),
        positive = %dataset.label_values[1],
        "dataset loaded"
    );

    let eval_options = EvalOptions {
        trials: options.trials,
        test_fraction: options.test_fraction,
    };
    let results = run_repeated_eval(&dataset.x, &dataset.y, eval_options, |_seed| {
        GiniTreeClassifier::default()
    })
    .map_err(|err| err.to_string())?;
    let summary = summarize(&results).map_err(|err| err.to_string())?;

    let mut sink = TextReport::new(std::io::stdout().lock());
    sink.report(&results, &summary).map_err(|err| err.to_string())?;
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut csv_path: Option<PathBuf> = None;
    let mut label_column = "label".to_string();
    let mut trials = 50usize;
    let mut test_fraction = 0.3f64;

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
            "--trials" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--trials requires a value".to_string())?;
                trials = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --trials value: {value}"))?;
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
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let csv_path = csv_path.ok_or_else(|| "--csv is required".to_string())?;
    Ok(CliOptions {
        csv_path,
        label_column,
        trials,
        test_fraction,
    })
}

fn help_text() -> String {
    [
        "clfeval-repeat",
        "",
        "Usage:",
        "  clfeval-repeat --csv <dataset.csv> [options]",
        "",
        "Options:",
        "  --label <name>         Binary label column (default: label).",
        "  --trials <n>           Number of seeded trials (default: 50).",
        "  --test-fraction <f>    Held-out fraction in (0, 1) (default: 0.3).",
    ]
    .join("\n")
}
