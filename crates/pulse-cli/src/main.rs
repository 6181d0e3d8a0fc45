//! Pulse CLI - Operational KPI knowledge graph
//!
//! Usage:
//!   pulse metrics               List metrics
//!   pulse show ED_LWBS          Show one metric
//!   pulse reason --json         Run reasoning
//!   pulse departments           Department health scores
//!   pulse serve --port 3000     Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let service = commands::load_service(cli.dataset.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Commands::Metrics => commands::cmd_metrics(&service),
        Commands::Reason { json } => commands::cmd_reason(&service, json),
        Commands::Departments => commands::cmd_departments(&service),
        Commands::Summary => commands::cmd_summary(&service),
        Commands::Show { id } => commands::cmd_show(&service, &id),
        Commands::Impact { id, upstream } => commands::cmd_impact(&service, &id, upstream),
        Commands::Serve { port, host } => commands::cmd_serve(service, &host, port).await,
    }
}
