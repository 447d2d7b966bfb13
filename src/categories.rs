//! `pmkt categories`: the category picker with per-category counts.

use anyhow::Result;
use plugin_market_core::models::CategoryFilter;
use plugin_market_core::query::categories;

use crate::catalog;
use crate::config::Config;

/// Print the category picker: the `all` sentinel followed by each category.
pub async fn list_categories(config: &Config) -> Result<()> {
    let records = catalog::load(config).await?;
    let counts = categories(&records);

    println!("{:<24} PLUGINS", "CATEGORY");
    println!("{:<24} {}", CategoryFilter::ALL, records.len());
    for c in &counts {
        println!("{:<24} {}", c.category, c.count);
    }

    Ok(())
}
