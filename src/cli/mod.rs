//! Command-line interface
//!
//! Three run-to-completion entry points mirroring the pipeline stages:
//! `ingest` cleans a raw CSV, `train` fits and persists the model, and
//! `serve` runs the scoring API.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::*;

use crate::ingest;
use crate::split::DEFAULT_SPLIT_SEED;
use crate::train::{TrainEngine, TrainingConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "telco-churn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Telco churn pipeline: clean, train, serve")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a raw customer CSV
    Ingest {
        /// Raw input CSV
        #[arg(short, long, default_value = "data/telco.csv")]
        input: PathBuf,

        /// Cleaned output CSV
        #[arg(short, long, default_value = "artifacts/clean/telco_clean.csv")]
        output: PathBuf,
    },

    /// Train the churn classifier and persist model + metrics artifacts
    Train {
        /// Cleaned CSV (preferred data source)
        #[arg(long, default_value = "artifacts/clean/telco_clean.csv")]
        clean: PathBuf,

        /// Raw CSV fallback
        #[arg(long, default_value = "data/telco.csv")]
        raw: PathBuf,

        /// Model artifact output
        #[arg(long, default_value = "artifacts/model.json")]
        model: PathBuf,

        /// Metrics snapshot output
        #[arg(long, default_value = "artifacts/metrics.json")]
        metrics: PathBuf,

        /// Train/test split seed
        #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
        seed: u64,
    },

    /// Serve the scoring API
    Serve {
        /// Server port
        #[arg(short, long, default_value_t = 8080)]
        port: u16,

        /// Server host
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Model artifact path (defaults to artifacts/model.json)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Metrics snapshot path (defaults to artifacts/metrics.json)
        #[arg(long)]
        metrics: Option<PathBuf>,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_ingest(input: &Path, output: &Path) -> anyhow::Result<()> {
    section("Ingest");
    println!("  {:<12} {}", muted("Input"), input.display());
    println!("  {:<12} {}", muted("Output"), output.display());

    let report = ingest::clean_file(input, output)?;

    println!();
    step_ok(&format!(
        "{} accepted, {} rejected",
        report.accepted.to_string().white().bold(),
        report.rejected
    ));
    println!();
    Ok(())
}

pub fn cmd_train(
    clean: PathBuf,
    raw: PathBuf,
    model: PathBuf,
    metrics: PathBuf,
    seed: u64,
) -> anyhow::Result<()> {
    section("Train");

    let config = TrainingConfig {
        clean_data: clean,
        raw_data: raw,
        model_path: model.clone(),
        metrics_path: metrics,
        seed,
        ..Default::default()
    };

    let snapshot = TrainEngine::new(config).run()?;

    println!();
    println!(
        "  {:<12} {}",
        muted("AUC"),
        format!("{:.3}", snapshot.area_under_roc_curve).white().bold()
    );
    println!(
        "  {:<12} {}",
        muted("Accuracy"),
        format!("{:.3}", snapshot.accuracy).white()
    );
    println!(
        "  {:<12} {}",
        muted("F1"),
        format!("{:.3}", snapshot.f1_score).white()
    );
    println!();
    step_ok(&format!("model saved to {}", model.display()));
    println!();
    Ok(())
}

pub async fn cmd_serve(
    host: &str,
    port: u16,
    model: Option<PathBuf>,
    metrics: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    let defaults = ServerConfig::default();
    let config = ServerConfig {
        host: host.to_string(),
        port,
        model_path: model.unwrap_or(defaults.model_path),
        metrics_path: metrics.unwrap_or(defaults.metrics_path),
    };

    println!();
    println!("  {:<12} http://{}:{}", muted("API"), config.host, config.port);
    println!("  {:<12} http://{}:{}/demo", muted("Demo"), config.host, config.port);
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    run_server(config).await
}
