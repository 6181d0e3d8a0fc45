//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pulse - Operational KPI knowledge graph
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Reason over operational KPIs: alerts, health scores, recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dataset file (TOML); defaults to the built-in hospital dataset
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Configuration file (TOML)
    ///
    /// Falls back to PULSE_CONFIG, then ~/.local/share/pulse/config/pulse.toml,
    /// then the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List metrics with their values
    Metrics,

    /// Run reasoning: alerts, insights and recommendations
    Reason {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show department health scores
    Departments,

    /// Show the executive summary
    Summary,

    /// Show one metric in full: department, categories, thresholds, status
    Show {
        /// Metric id (e.g. ED_LWBS)
        id: String,
    },

    /// Show what a metric influences (or is influenced by)
    Impact {
        /// Metric id (e.g. ED_Wait_Time)
        id: String,

        /// Walk `depends_on` edges instead of `affects`
        #[arg(long)]
        upstream: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
