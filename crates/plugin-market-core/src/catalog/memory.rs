//! In-memory [`CatalogSource`] for tests and embedders.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::RawPlugin;

use super::CatalogSource;

/// Serves a fixed list of listings.
pub struct InMemorySource {
    name: String,
    plugins: Vec<RawPlugin>,
}

impl InMemorySource {
    pub fn new(plugins: Vec<RawPlugin>) -> Self {
        Self {
            name: "memory".to_string(),
            plugins,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CatalogSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawPlugin>> {
        Ok(self.plugins.clone())
    }
}
