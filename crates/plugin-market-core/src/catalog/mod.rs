//! Catalog sources and the load-time annotation step.
//!
//! A [`CatalogSource`] supplies raw listings (a JSON file, an in-memory
//! fixture, or eventually a remote fetch). [`load_catalog`] pulls from a
//! source and runs [`annotate`], which checks ids and attaches engagement
//! numbers exactly once per record. The annotated catalog is what the query
//! engine consumes.

pub mod memory;

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::engagement::engagement_for;
use crate::models::{PluginRecord, RawPlugin};

/// Keys that are derived on load and must not be taken from the source.
const DERIVED_KEYS: [&str; 2] = ["likes", "downloads"];

/// Abstract supplier of raw catalog listings.
///
/// Implementations must be `Send + Sync` so a loaded source can be shared
/// across tasks.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short label used in logs and error messages.
    fn name(&self) -> &str;

    /// Return every listing the source currently holds, in display order.
    async fn fetch(&self) -> Result<Vec<RawPlugin>>;
}

/// Attach engagement numbers to raw listings.
///
/// Fails on duplicate ids. Any authored `likes`/`downloads` values are
/// dropped in favor of the generated ones. Order is preserved.
pub fn annotate(raw: Vec<RawPlugin>) -> Result<Vec<PluginRecord>> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());

    for mut plugin in raw {
        if !seen.insert(plugin.id) {
            bail!("duplicate plugin id in catalog: {}", plugin.id);
        }
        for key in DERIVED_KEYS {
            if plugin.extra.remove(key).is_some() {
                debug!(id = %plugin.id, key, "ignoring authored engagement value");
            }
        }
        let engagement = engagement_for(plugin.id.get());
        records.push(PluginRecord::from_raw(plugin, engagement));
    }

    Ok(records)
}

/// Fetch from `source` and annotate the result.
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Vec<PluginRecord>> {
    let raw = source
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch catalog from source '{}'", source.name()))?;
    let records = annotate(raw)
        .with_context(|| format!("Invalid catalog from source '{}'", source.name()))?;
    debug!(source = source.name(), count = records.len(), "catalog loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawPlugin {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_annotate_attaches_generated_engagement() {
        let records = annotate(vec![
            raw(json!({"id": 1, "title": "A", "category": "cms"})),
            raw(json!({"id": 2, "title": "B", "category": "cms"})),
        ])
        .unwrap();
        assert_eq!(records.len(), 2);
        for r in &records {
            let e = engagement_for(r.id.get());
            assert_eq!(r.likes, e.likes);
            assert_eq!(r.downloads, e.downloads);
        }
        assert_eq!(records[0].id.get(), 1);
        assert_eq!(records[1].id.get(), 2);
    }

    #[test]
    fn test_annotate_ignores_authored_counts() {
        let records = annotate(vec![raw(json!({
            "id": 4,
            "title": "A",
            "category": "cms",
            "likes": 99999,
            "downloads": 1,
            "author": "someone"
        }))])
        .unwrap();
        let r = &records[0];
        assert_eq!(r.likes, engagement_for(4).likes);
        assert!(!r.extra.contains_key("likes"));
        assert!(!r.extra.contains_key("downloads"));
        assert_eq!(r.extra.get("author"), Some(&json!("someone")));
    }

    #[test]
    fn test_annotate_rejects_duplicates() {
        let err = annotate(vec![
            raw(json!({"id": 3, "title": "A", "category": "cms"})),
            raw(json!({"id": "3", "title": "B", "category": "cms"})),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate plugin id"));
    }
}
