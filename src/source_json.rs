//! JSON file catalog source.
//!
//! Reads a catalog file from disk. Two layouts are accepted:
//!
//! ```json
//! [ { "id": 1, "title": "...", "category": "..." }, ... ]
//! ```
//!
//! or the same array wrapped as `{ "plugins": [ ... ] }`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use plugin_market_core::catalog::CatalogSource;
use plugin_market_core::models::RawPlugin;
use std::path::{Path, PathBuf};

/// Catalog backed by a JSON file.
pub struct JsonFileSource {
    path: PathBuf,
    label: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = format!("file:{}", path.display());
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse catalog JSON text in either accepted layout.
pub fn parse_catalog(content: &str) -> Result<Vec<RawPlugin>> {
    // Entries are decoded one by one so errors name the offending index.
    let value: serde_json::Value = serde_json::from_str(content)?;
    let entries = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("plugins") {
            Some(serde_json::Value::Array(items)) => items,
            _ => anyhow::bail!("catalog object must contain a \"plugins\" array"),
        },
        _ => anyhow::bail!("catalog must be a JSON array or an object with \"plugins\""),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value::<RawPlugin>(entry)
                .with_context(|| format!("invalid plugin entry at index {}", i))
        })
        .collect()
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<Vec<RawPlugin>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog file: {}", self.path.display()))?;
        parse_catalog(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", self.path.display()))
    }
}
