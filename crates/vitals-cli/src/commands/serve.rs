//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use vitals_core::{HealthEngine, MemoryStore};
use vitals_server::ServerConfig;

use super::load_config;

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    data: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Vitals web server...");
    println!("   Listening: http://{}:{}", host, port);

    let store = match data {
        Some(path) => {
            println!("   Data: {}", path.display());
            MemoryStore::load_json(path)
                .with_context(|| format!("Failed to load seed data from {}", path.display()))?
        }
        None => {
            println!("   Data: in-memory (not persisted)");
            MemoryStore::new()
        }
    };
    println!("   Press Ctrl-C to stop");

    if allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }

    let engine = HealthEngine::with_config(load_config(config_path)?);
    let config = ServerConfig { allowed_origins };

    let addr = format!("{}:{}", host, port);
    vitals_server::serve_with_config(&addr, store.clone(), engine, config)
        .await
        .context("Server error")?;

    if let Some(path) = data {
        save_store(&store, path)?;
    }

    Ok(())
}

/// Write the store back to its seed file
pub fn save_store(store: &MemoryStore, path: &Path) -> Result<()> {
    store
        .save_json(path)
        .with_context(|| format!("Failed to save data to {}", path.display()))?;
    println!("💾 Saved data to {}", path.display());
    Ok(())
}
