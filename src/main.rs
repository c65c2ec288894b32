//! Telco Churn - Main Entry Point

use clap::Parser;
use telco_churn::cli::{cmd_ingest, cmd_serve, cmd_train, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "telco_churn=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { input, output } => {
            cmd_ingest(&input, &output)?;
        }
        Commands::Train {
            clean,
            raw,
            model,
            metrics,
            seed,
        } => {
            cmd_train(clean, raw, model, metrics, seed)?;
        }
        Commands::Serve {
            port,
            host,
            model,
            metrics,
        } => {
            cmd_serve(&host, port, model, metrics).await?;
        }
    }

    Ok(())
}
