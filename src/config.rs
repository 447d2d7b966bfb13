use anyhow::{Context, Result};
use plugin_market_core::models::{CategoryFilter, SortKey};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::default(),
            default_category: default_category(),
            limit: default_limit(),
        }
    }
}

fn default_category() -> String {
    CategoryFilter::ALL.to_string()
}
fn default_limit() -> usize {
    50
}

impl QueryConfig {
    pub fn category_filter(&self) -> CategoryFilter {
        self.default_category.parse().unwrap_or_default()
    }
}

impl Config {
    /// Defaults used when no config file is present.
    pub fn minimal() -> Self {
        Self {
            catalog: CatalogConfig {
                path: PathBuf::from("./data/plugins.json"),
            },
            query: QueryConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.query.limit < 1 {
        anyhow::bail!("query.limit must be >= 1");
    }

    if config.query.default_category.trim().is_empty() {
        anyhow::bail!("query.default_category must not be empty; use \"all\" for no filter");
    }

    // Relative catalog paths resolve against the config file's directory.
    if config.catalog.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.catalog.path = dir.join(&config.catalog.path);
        }
    }

    Ok(config)
}
