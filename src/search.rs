//! Catalog search for the CLI.
//!
//! [`search_catalog`] resolves CLI arguments against configured defaults,
//! loads the catalog, and delegates to the core query engine.
//! [`run_search`] prints the result as a table or JSON.

use anyhow::{bail, Result};
use plugin_market_core::models::{CategoryFilter, PluginRecord, QuerySpec, SortKey};
use plugin_market_core::query::query;
use std::time::Instant;
use tracing::debug;

use crate::catalog;
use crate::config::Config;

const TITLE_WIDTH: usize = 36;
const CATEGORY_WIDTH: usize = 14;

/// Build the [`QuerySpec`] for a search, falling back to `[query]` defaults.
pub fn build_spec(
    config: &Config,
    term: Option<&str>,
    category: Option<&str>,
    sort: Option<&str>,
) -> Result<QuerySpec> {
    let sort_key = match sort {
        Some(s) => s.parse::<SortKey>()?,
        None => config.query.default_sort,
    };
    let category_filter = match category {
        Some(c) if c.trim().is_empty() => {
            bail!("--category must not be empty; use \"all\" for no filter")
        }
        Some(c) => c.parse::<CategoryFilter>().unwrap_or_default(),
        None => config.query.category_filter(),
    };
    Ok(QuerySpec::new(term.unwrap_or(""), category_filter, sort_key))
}

/// Run a search and return the matching records, truncated to the limit.
pub async fn search_catalog(
    config: &Config,
    term: Option<&str>,
    category: Option<&str>,
    sort: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<PluginRecord>> {
    let limit = limit.unwrap_or(config.query.limit);
    if limit == 0 {
        bail!("--limit must be >= 1");
    }
    let spec = build_spec(config, term, category, sort)?;
    let records = catalog::load(config).await?;

    let started = Instant::now();
    let mut results = query(&records, &spec);
    debug!(
        term = %spec.search_term,
        category = %spec.category_filter,
        sort = %spec.sort_key,
        matched = results.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "query finished"
    );

    results.truncate(limit);
    Ok(results)
}

/// CLI entry point: search and print.
pub async fn run_search(
    config: &Config,
    term: Option<&str>,
    category: Option<&str>,
    sort: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let results = search_catalog(config, term, category, sort, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    println!(
        "{:<6} {:<title_w$} {:<cat_w$} {:>6} {:>9}  UPDATED",
        "ID",
        "TITLE",
        "CATEGORY",
        "LIKES",
        "DOWNLOADS",
        title_w = TITLE_WIDTH,
        cat_w = CATEGORY_WIDTH
    );
    for r in &results {
        println!(
            "{:<6} {:<title_w$} {:<cat_w$} {:>6} {:>9}  {}",
            r.id.get(),
            truncate(&r.title, TITLE_WIDTH),
            truncate(&r.category, CATEGORY_WIDTH),
            r.likes,
            r.downloads,
            r.updated_date,
            title_w = TITLE_WIDTH,
            cat_w = CATEGORY_WIDTH
        );
    }
    println!();
    println!("{} result(s)", results.len());

    Ok(())
}

/// Cut `s` to at most `width` characters, marking the cut with `…`.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_spec_uses_config_defaults() {
        let mut cfg = Config::minimal();
        cfg.query.default_sort = SortKey::Downloads;
        cfg.query.default_category = "cms".to_string();

        let spec = build_spec(&cfg, None, None, None).unwrap();
        assert_eq!(spec.search_term, "");
        assert_eq!(spec.sort_key, SortKey::Downloads);
        assert_eq!(spec.category_filter, CategoryFilter::Exact("cms".to_string()));
    }

    #[test]
    fn test_build_spec_overrides() {
        let cfg = Config::minimal();
        let spec = build_spec(&cfg, Some("tiles"), Some("all"), Some("title")).unwrap();
        assert_eq!(spec.search_term, "tiles");
        assert_eq!(spec.category_filter, CategoryFilter::All);
        assert_eq!(spec.sort_key, SortKey::Title);
    }

    #[test]
    fn test_build_spec_rejects_bad_sort() {
        let cfg = Config::minimal();
        assert!(build_spec(&cfg, None, None, Some("newest")).is_err());
    }

    #[test]
    fn test_build_spec_rejects_blank_category() {
        let cfg = Config::minimal();
        for blank in ["", "   "] {
            let err = build_spec(&cfg, None, Some(blank), None).unwrap_err();
            assert!(err.to_string().contains("--category must not be empty"));
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("気象データ株式会社", 4), "気象デ…");
    }
}
