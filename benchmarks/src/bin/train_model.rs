//! Train a maintenance model on CSV or synthetic data and write the model file.
//!
//! ```text
//! cargo run -p maintenance-bench --bin train_model -- --rule threshold --epochs 2000
//! ```

use anyhow::{Context, Result};
use benchmarks::{time_fn, SensorCsvDataset};
use clap::{Parser, ValueEnum};
use maintenance_model::{LabelRule, TrainConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Rule {
    Threshold,
    RiskScore,
}

impl From<Rule> for LabelRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Threshold => LabelRule::threshold(),
            Rule::RiskScore => LabelRule::risk_score(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "train_model", about = "Train the equipment failure model")]
struct Cli {
    /// JSON training config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Labeled CSV (temperature,vibration,pressure,rpm,label); synthetic data if absent
    #[arg(long)]
    data: Option<PathBuf>,

    #[arg(long)]
    samples: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Labeling rule for synthetic data
    #[arg(long, value_enum)]
    rule: Option<Rule>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    /// Trailing fraction of samples held out for evaluation
    #[arg(long)]
    holdout: Option<f64>,

    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => TrainConfig::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => TrainConfig::default(),
        };
        if let Some(n) = self.samples {
            config.n_samples = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rule) = self.rule {
            config.rule = rule.into();
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(holdout) = self.holdout {
            config.holdout = holdout;
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let dataset = match &cli.data {
        Some(path) => SensorCsvDataset::load(path)
            .and_then(SensorCsvDataset::into_dataset)
            .with_context(|| format!("loading {}", path.display()))?,
        None => config
            .synthetic()
            .generate()
            .context("generating synthetic data")?,
    };
    info!(
        samples = dataset.len(),
        positive_rate = dataset.positive_rate(),
        "dataset ready"
    );

    let (train, holdout) = dataset.split_holdout(config.holdout)?;
    let trainer = config.trainer();

    let (report, elapsed) = time_fn(|| trainer.fit(&train));
    let report = report.context("training failed")?;
    info!(
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "train: {}", report.train_metrics
    );

    if let Some(holdout) = holdout {
        let metrics = trainer.evaluate(&report.model, &holdout)?;
        info!(samples = holdout.len(), "holdout: {}", metrics);
    }

    if let Some(params) = report.model.params() {
        info!(weights = ?params.weights.to_vec(), bias = params.bias, "learned parameters");
    }

    report
        .model
        .save(&config.output_path)
        .with_context(|| format!("writing {}", config.output_path.display()))?;
    Ok(())
}
