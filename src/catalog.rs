//! Catalog loading for CLI commands.
//!
//! Every command that needs plugin listings goes through [`load`], which
//! reads the configured JSON file and annotates it with engagement numbers.

use anyhow::Result;
use plugin_market_core::catalog::load_catalog;
use plugin_market_core::models::PluginRecord;
use tracing::info;

use crate::config::Config;
use crate::source_json::JsonFileSource;

/// Load and annotate the catalog named in `config`.
pub async fn load(config: &Config) -> Result<Vec<PluginRecord>> {
    let source = JsonFileSource::new(&config.catalog.path);
    let records = load_catalog(&source).await?;
    info!(
        path = %source.path().display(),
        plugins = records.len(),
        "catalog loaded"
    );
    Ok(records)
}
