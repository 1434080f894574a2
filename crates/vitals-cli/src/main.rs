//! Vitals CLI - Financial health scoring
//!
//! Usage:
//!   vitals score --income 5000 --expenses 4000 --savings 2000
//!   vitals score --input snapshot.json --json
//!   vitals config
//!   vitals serve --port 3000

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

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Score {
            income,
            expenses,
            balance,
            savings,
            goals,
            input,
            json,
        } => {
            let snapshot = vitals_core::FinancialSnapshot::new(income, expenses, balance, savings);
            commands::cmd_score(config, snapshot, &goals, input.as_deref(), json)
        }
        Commands::Config { path } => commands::cmd_config(config, path),
        Commands::Serve {
            port,
            host,
            data,
            allow_origins,
        } => commands::cmd_serve(config, &host, port, data.as_deref(), allow_origins).await,
    }
}
