//! Next-game stat prediction CLI
//!
//! Takes a player name and a stat name and prints exactly one JSON object:
//! the prediction payload on success, `{"success": false, "error": ...}`
//! on any pipeline failure.

use clap::Parser;
use serde_json::json;

use hoopcast::data::{NbaStatsClient, ReferenceTables};
use hoopcast::predict::{PredictionReport, PredictionService};
use hoopcast::{Config, Result};

#[derive(Parser)]
#[command(name = "hoopcast")]
#[command(about = "Predict a player's next-game stat line from their full game log", long_about = None)]
struct Cli {
    /// Player name (free-form, e.g. "lebron" or "Jayson Tatum")
    player: String,

    /// Stat name (free-form, e.g. "points", "reb", "threes")
    stat: String,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Override the train/test split seed
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Config problems are setup errors, not prediction failures
    let mut config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };
    if let Some(seed) = cli.seed {
        config.model.seed = seed;
    }

    // Every pipeline failure becomes a failure JSON with exit code 0
    match run(&config, &cli.player, &cli.stat) {
        Ok(report) => println!("{}", success_json(&report)),
        Err(e) => {
            log::debug!("Prediction failed: {:?}", e);
            println!("{}", json!({ "success": false, "error": e.to_string() }));
        }
    }
}

fn run(config: &Config, player: &str, stat: &str) -> Result<PredictionReport> {
    let tables = ReferenceTables::load(&config.data)?;
    let client = NbaStatsClient::new();
    let service = PredictionService::new(&client, &tables, config);
    service.predict(player, stat)
}

fn success_json(report: &PredictionReport) -> String {
    json!({
        "success": true,
        "player": report.player,
        "stat": report.stat.code(),
        "readable_stat": report.stat.readable(),
        "prediction": round1(report.prediction),
        "confidence": round1(report.confidence),
        "range": {
            "min": round1(report.range_min),
            "max": round1(report.range_max),
        },
        "mae": round2(report.mae),
        "data_points": report.data_points,
        "features_used": report.features_used,
    })
    .to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
