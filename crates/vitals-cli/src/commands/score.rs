//! Score command implementation

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use vitals_core::{FinancialSnapshot, Goal, HealthEngine, HealthReport, MetricStatus};

use super::load_config;

/// Contents of a `--input` file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScoreInput {
    pub snapshot: FinancialSnapshot,
    pub goals: Vec<Goal>,
}

pub fn cmd_score(
    config_path: Option<&Path>,
    snapshot: FinancialSnapshot,
    goal_args: &[String],
    input: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let engine = HealthEngine::with_config(config);

    let input = match input {
        Some(path) => read_input(path)?,
        None => ScoreInput {
            snapshot,
            goals: goal_args
                .iter()
                .map(|g| parse_goal(g))
                .collect::<Result<Vec<_>>>()?,
        },
    };

    let report = engine.compute(&input.snapshot, &input.goals);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Read a `{ snapshot, goals }` document
pub fn read_input(path: &Path) -> Result<ScoreInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid score input in {}", path.display()))
}

/// Parse a `CURRENT:TARGET` goal argument
pub fn parse_goal(arg: &str) -> Result<Goal> {
    let Some((current, target)) = arg.split_once(':') else {
        bail!("Invalid goal '{}': expected CURRENT:TARGET", arg);
    };

    let current: f64 = current
        .trim()
        .parse()
        .with_context(|| format!("Invalid goal current amount: '{}'", current))?;
    let target: f64 = target
        .trim()
        .parse()
        .with_context(|| format!("Invalid goal target amount: '{}'", target))?;

    Ok(Goal::with_amounts(current, target))
}

fn status_icon(status: MetricStatus) -> &'static str {
    match status {
        MetricStatus::Good => "✅",
        MetricStatus::Warning => "⚠️ ",
        MetricStatus::Poor => "❌",
    }
}

fn print_report(report: &HealthReport) {
    println!();
    println!(
        "💪 Financial Health: {}/100 ({})",
        report.overall_score, report.category
    );
    println!("   ─────────────────────────────────────────────────────────");

    for metric in report.metrics.values() {
        println!(
            "   {} {:<22} {:>8}   score {:>5.1}",
            status_icon(metric.status),
            metric.label,
            metric.value,
            metric.score
        );
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("💡 Recommendations");
        for rec in &report.recommendations {
            println!("   • {}", rec);
        }
    }
}
