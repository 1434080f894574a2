//! CLI command implementations
//!
//! - `config` - Show the effective scoring configuration
//! - `score` - Score a snapshot from flags or a JSON file
//! - `serve` - Web server command

pub mod config;
pub mod score;
pub mod serve;

// Re-export command functions for main.rs
pub use config::*;
pub use score::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use vitals_core::ScoringConfig;

/// Load the scoring config, naming the source on failure
pub fn load_config(explicit: Option<&Path>) -> Result<ScoringConfig> {
    ScoringConfig::load(explicit).with_context(|| match explicit {
        Some(path) => format!("Failed to load scoring config from {}", path.display()),
        None => "Failed to load scoring config".to_string(),
    })
}
