//! Score one sensor reading with a saved model.
//!
//! ```text
//! cargo run -p maintenance-bench --bin score_reading -- \
//!     --model model_weights.json --temperature 88 --vibration 4.8 --pressure 100 --rpm 1500
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use maintenance_model::{MaintenanceModel, RiskLevel, SensorReading};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "score_reading", about = "Predict failure probability for one reading")]
struct Cli {
    #[arg(long, default_value = "model_weights.json")]
    model: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    temperature: f64,

    #[arg(long, allow_negative_numbers = true)]
    vibration: f64,

    #[arg(long, allow_negative_numbers = true)]
    pressure: f64,

    #[arg(long, allow_negative_numbers = true)]
    rpm: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let model = MaintenanceModel::from_file(&cli.model)
        .with_context(|| format!("loading model {}", cli.model.display()))?;

    let reading = SensorReading::new(cli.temperature, cli.vibration, cli.pressure, cli.rpm);
    let probability = model.predict_reading(&reading)?;
    let risk = RiskLevel::from_probability(probability);

    println!("failure probability: {:.4}", probability);
    println!("risk level: {}", risk);
    Ok(())
}
