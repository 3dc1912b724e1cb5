//! Aeolus - Wind Turbine Predictive Maintenance
//!
//! # Usage
//!
//! ```bash
//! # Serve the dashboard API (default command)
//! aeolus serve --addr 0.0.0.0:8000 --model-dir ./models
//!
//! # Assess one reading and print the JSON report
//! aeolus assess --input reading.json
//!
//! # Validate the effective configuration
//! aeolus --config aeolus.toml check-config
//! ```
//!
//! # Environment Variables
//!
//! - `AEOLUS_CONFIG`: Path to the engine TOML config
//! - `AEOLUS_SERVER_ADDR`: Server bind address (overridden by `--addr`)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use aeolus::api::{create_app, ApiState};
use aeolus::config::{self, EngineConfig};
use aeolus::{models, MaintenanceEngine, ModelSet, RandomSampleSource, SensorReading};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "aeolus")]
#[command(about = "Wind turbine predictive maintenance engine")]
#[command(version)]
struct CliArgs {
    /// Engine config file (default: $AEOLUS_CONFIG, then ./aeolus.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding classifier.json / scaler.json / feature_names.json
    #[arg(long, global = true, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the HTTP API
    Serve {
        /// Override the server address (default: "0.0.0.0:8000")
        #[arg(short, long, env = "AEOLUS_SERVER_ADDR")]
        addr: Option<String>,

        /// Seed for the demo sample generator
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run one assessment and one full cycle on a reading and print JSON
    Assess {
        /// SensorReading JSON file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Seed for the trend windows behind the schedule
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate the effective configuration and print it as TOML
    CheckConfig,
}

// ============================================================================
// Startup helpers
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => EngineConfig::load().context("Failed to load engine config"),
    }
}

fn load_models(dir: Option<&Path>) -> Result<ModelSet> {
    match dir {
        Some(d) => {
            if !d.is_dir() {
                anyhow::bail!("Model directory {} does not exist", d.display());
            }
            Ok(models::load_bundle(d))
        }
        None => {
            info!("No model directory given, serving fallback predictions");
            Ok(ModelSet::default())
        }
    }
}

fn read_reading(path: &Path) -> Result<SensorReading> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid SensorReading in {}", path.display()))
}

// ============================================================================
// Commands
// ============================================================================

async fn serve(engine: MaintenanceEngine, addr: String, seed: Option<u64>) -> Result<()> {
    let samples = Arc::new(RandomSampleSource::new(seed));
    let app = create_app(ApiState::new(engine, samples));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "HTTP server listening");

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await;

    match result {
        Ok(()) => {
            info!("[HttpServer] Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("[HttpServer] Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {}", e))
        }
    }
}

fn assess(engine: &MaintenanceEngine, input: &Path, seed: Option<u64>) -> Result<()> {
    let reading = read_reading(input)?;
    let today = Utc::now().date_naive();
    let samples = RandomSampleSource::new(seed);

    let report = serde_json::json!({
        "assessment": engine.assess(&reading, today),
        "cycle": engine.run_cycle(&reading, &samples, today),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn check_config(config: &EngineConfig) -> Result<()> {
    config.validate().context("Configuration is invalid")?;
    println!("{}", config.to_toml()?);
    info!(turbine = %config.turbine.id, "Configuration is valid");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let engine_config = load_config(args.config.as_deref())?;
    config::init(engine_config);
    let config = config::get();

    let command = args.command.unwrap_or(SubCommand::Serve { addr: None, seed: None });
    match command {
        SubCommand::CheckConfig => check_config(config),
        SubCommand::Assess { input, seed } => {
            let models = load_models(args.model_dir.as_deref())?;
            let engine = MaintenanceEngine::new(config.clone(), models);
            assess(&engine, &input, seed)
        }
        SubCommand::Serve { addr, seed } => {
            let models = load_models(args.model_dir.as_deref())?;
            let engine = MaintenanceEngine::new(config.clone(), models);
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            serve(engine, addr, seed).await
        }
    }
}
