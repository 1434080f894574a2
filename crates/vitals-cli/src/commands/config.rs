//! Config command implementation

use std::path::Path;

use anyhow::Result;
use vitals_core::config::CONFIG_ENV_VAR;
use vitals_core::{default_config_path, MetricKind};

use super::load_config;

pub fn cmd_config(explicit: Option<&Path>, path_only: bool) -> Result<()> {
    if path_only {
        match default_config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("(no data directory available on this platform)"),
        }
        return Ok(());
    }

    let config = load_config(explicit)?;

    println!();
    println!("⚙️  Scoring Configuration");
    println!("   ─────────────────────────────────────────");
    println!("   Source: {}", config_source(explicit));
    println!();
    for kind in MetricKind::all() {
        println!(
            "   {:<22} {:>5.0}%",
            kind.label(),
            config.weights.get(*kind) * 100.0
        );
    }
    println!();
    println!(
        "   Recommendations: {} to {}",
        config.min_recommendations, config.max_recommendations
    );

    Ok(())
}

/// Describe where the effective configuration came from
pub fn config_source(explicit: Option<&Path>) -> String {
    if let Some(path) = explicit {
        return path.display().to_string();
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return format!("{} ({})", Path::new(&path).display(), CONFIG_ENV_VAR);
    }
    match default_config_path() {
        Some(path) if path.exists() => path.display().to_string(),
        _ => "embedded defaults".to_string(),
    }
}
