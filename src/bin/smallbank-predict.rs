//! Developer utility to train a classifier from a training file and query it once.

use std::path::PathBuf;

use serde::Serialize;
use smallbank_classifier::config::{self, Benchmark, ClassifierConfig, ModelKind};
use smallbank_classifier::logging;
use smallbank_classifier::{
    ConcurrencyControlClassifier, ConcurrencyFeatures, PartitionFeatures, PartitioningClassifier,
    TrainingSummary,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
enum TrainingSource {
    File(PathBuf),
    Benchmark(Benchmark),
}

#[derive(Debug, Clone)]
struct CliOptions {
    model: ModelKind,
    source: TrainingSource,
    features: Vec<f64>,
    json: bool,
}

#[derive(Debug, Serialize)]
struct PredictionReport {
    model: ModelKind,
    training_file: PathBuf,
    summary: TrainingSummary,
    features: Vec<f64>,
    outcome: String,
    code: u8,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let config = load_config(&options.source)?;
    if let Err(err) = logging::init(&config.logging) {
        eprintln!("Logging disabled: {err}");
    }

    let training_file = resolve_training_file(&options, &config);
    let train_options = config.train_options();
    let report = match options.model {
        ModelKind::Partition => {
            let [a, b, c, d, e, f] = fixed_features::<6>(&options.features)?;
            let classifier = PartitioningClassifier::train_with(&training_file, &train_options)
                .map_err(|err| err.to_string())?;
            let outcome = classifier.predict(PartitionFeatures::new(a, b, c, d, e, f));
            PredictionReport {
                model: options.model,
                training_file,
                summary: *classifier.summary(),
                features: options.features,
                outcome: format!("{outcome:?}"),
                code: outcome.code(),
            }
        }
        ModelKind::Concurrency => {
            let [a, b, c, d] = fixed_features::<4>(&options.features)?;
            let classifier =
                ConcurrencyControlClassifier::train_with(&training_file, &train_options)
                    .map_err(|err| err.to_string())?;
            let outcome = classifier.predict(ConcurrencyFeatures::new(a, b, c, d));
            PredictionReport {
                model: options.model,
                training_file,
                summary: *classifier.summary(),
                features: options.features,
                outcome: format!("{outcome:?}"),
                code: outcome.code(),
            }
        }
    };

    if options.json {
        let text = serde_json::to_string_pretty(&report).map_err(|err| err.to_string())?;
        println!("{text}");
    } else {
        println!("{}", report.code);
    }
    Ok(())
}

/// Only `--benchmark` needs `classifier.toml`; an explicit `--train` file
/// falls back to defaults when the config cannot be loaded.
fn load_config(source: &TrainingSource) -> Result<ClassifierConfig, String> {
    match (config::load_or_default(), source) {
        (Ok(config), _) => Ok(config),
        (Err(err), TrainingSource::Benchmark(_)) => Err(err.to_string()),
        (Err(err), TrainingSource::File(_)) => {
            eprintln!("Ignoring configuration: {err}");
            Ok(ClassifierConfig::default())
        }
    }
}

fn resolve_training_file(options: &CliOptions, config: &ClassifierConfig) -> PathBuf {
    match &options.source {
        TrainingSource::File(path) => path.clone(),
        TrainingSource::Benchmark(benchmark) => config.training.path_for(*benchmark, options.model),
    }
}

fn fixed_features<const N: usize>(values: &[f64]) -> Result<[f64; N], String> {
    <[f64; N]>::try_from(values)
        .map_err(|_| format!("Expected {N} feature values, got {}", values.len()))
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut model: Option<ModelKind> = None;
    let mut source: Option<TrainingSource> = None;
    let mut features: Option<Vec<f64>> = None;
    let mut json = false;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--model" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--model requires a value".to_string())?;
                model = Some(
                    ModelKind::parse(value)
                        .ok_or_else(|| format!("Invalid --model value: {value}"))?,
                );
            }
            "--train" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--train requires a value".to_string())?;
                source = Some(TrainingSource::File(PathBuf::from(value)));
            }
            "--benchmark" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--benchmark requires a value".to_string())?;
                let benchmark = Benchmark::parse(value)
                    .ok_or_else(|| format!("Invalid --benchmark value: {value}"))?;
                source = Some(TrainingSource::Benchmark(benchmark));
            }
            "--features" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--features requires a value".to_string())?;
                features = Some(parse_feature_list(value)?);
            }
            "--json" => json = true,
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    Ok(CliOptions {
        model: model.ok_or_else(help_text)?,
        source: source.ok_or_else(help_text)?,
        features: features.ok_or_else(help_text)?,
        json,
    })
}

fn parse_feature_list(value: &str) -> Result<Vec<f64>, String> {
    value
        .split(',')
        .map(|item| {
            item.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid feature value: {item}"))
        })
        .collect()
}

fn help_text() -> String {
    [
        "smallbank-predict",
        "",
        "Trains one classifier from a training file and prints its prediction.",
        "",
        "Usage:",
        "  smallbank-predict --model <partition|concurrency> (--train <file> | --benchmark <name>) --features <v1,v2,...> [--json]",
        "",
        "Options:",
        "  --model <kind>        partition (6 features) or concurrency (4 features) (required).",
        "  --train <file>        Tab-separated training file.",
        "  --benchmark <name>    single, smallbank or tpcc; resolves the file from classifier.toml.",
        "  --features <list>     Comma-separated feature values (required).",
        "  --json                Print a JSON report instead of the bare outcome code.",
    ]
    .join("\n")
}
