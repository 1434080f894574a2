//! CLI argument definitions using clap
//!
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vitals - Score your financial health
#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Financial health scoring from income, spending, savings and goals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Scoring config file (overrides VITALS_CONFIG and the data dir default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a financial snapshot
    Score {
        /// Monthly income
        #[arg(long, default_value = "0")]
        income: f64,

        /// Monthly expenses
        #[arg(long, default_value = "0")]
        expenses: f64,

        /// Current balance
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        balance: f64,

        /// Accumulated savings
        #[arg(long, default_value = "0")]
        savings: f64,

        /// Savings goal as CURRENT:TARGET (repeatable)
        #[arg(short, long = "goal", value_name = "CURRENT:TARGET")]
        goals: Vec<String>,

        /// JSON file with { "snapshot": {...}, "goals": [...] } (replaces the flags)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective scoring configuration
    Config {
        /// Only print the user config override path
        #[arg(long)]
        path: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// JSON data file to load at startup and write back on Ctrl-C
        #[arg(long)]
        data: Option<PathBuf>,

        /// Allowed CORS origin (repeatable; none = same-origin only)
        #[arg(long = "allow-origin", value_name = "ORIGIN")]
        allow_origins: Vec<String>,
    },
}
