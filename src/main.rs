//! # Bakery Floor
//!
//! Runs the sales-floor simulation until a configured limit closes the floor
//! or Ctrl-C is pressed, then logs the final report.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --config bakery.toml
//! cargo run -- --sellers 5 --seed 42 --duration 30
//! ```

use bakery_floor::lifecycle::{setup_tracing, BakerySystem};
use bakery_floor::model::BakeryConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Instrument};

#[derive(Parser)]
#[command(name = "bakery-floor")]
#[command(version)]
#[command(about = "Simulate customers and sellers on a bakery's sales floor")]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "BAKERY_CONFIG")]
    config: Option<PathBuf>,

    /// Number of sellers behind the counter
    #[arg(long)]
    sellers: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum runtime in seconds
    #[arg(long)]
    duration: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<BakeryConfig, String> {
        let mut config = match &self.config {
            Some(path) => BakeryConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
            None => BakeryConfig::default(),
        };
        if let Some(sellers) = self.sellers {
            config.num_sellers = sellers;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.duration.is_some() {
            config.limits.max_runtime_secs = self.duration;
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Cli::parse().into_config()?;
    info!(
        sellers = config.num_sellers,
        complaint_probability = config.complaint_probability,
        max_runtime_secs = ?config.limits.max_runtime_secs,
        "Starting bakery floor"
    );

    let system = BakerySystem::start(config).map_err(|e| e.to_string())?;

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let span = tracing::info_span!("floor");
    let report = system
        .run_until(ctrl_c)
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    report.log_summary();
    info!("Bakery closed");
    Ok(())
}
