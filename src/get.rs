//! Plugin retrieval by id.
//!
//! Used by `pmkt get` to show a single annotated listing in full.

use anyhow::{anyhow, Result};
use plugin_market_core::models::{PluginId, PluginRecord};

use crate::catalog;
use crate::config::Config;

/// Core get function returning structured data.
pub async fn get_plugin(config: &Config, id: &str) -> Result<PluginRecord> {
    let id: PluginId = id.parse()?;
    let records = catalog::load(config).await?;
    records
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow!("plugin not found: {}", id))
}

/// CLI entry point — calls get_plugin and prints to stdout.
pub async fn run_get(config: &Config, id: &str, json: bool) -> Result<()> {
    let plugin = match get_plugin(config, id).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plugin)?);
        return Ok(());
    }

    println!("--- Plugin ---");
    println!("id:          {}", plugin.id);
    println!("title:       {}", plugin.title);
    println!("category:    {}", plugin.category);
    if let Some(ref company) = plugin.company {
        println!("company:     {}", company);
    }
    if !plugin.tags.is_empty() {
        println!("tags:        {}", plugin.tags.join(", "));
    }
    println!("updated:     {}", plugin.updated_date);
    println!("likes:       {}", plugin.likes);
    println!("downloads:   {}", plugin.downloads);
    for (key, value) in &plugin.extra {
        println!("{:<12} {}", format!("{}:", key), value);
    }
    println!();

    if let Some(ref description) = plugin.description {
        println!("--- Description ---");
        println!("{}", description);
        println!();
    }
    if let Some(ref full) = plugin.full_description {
        println!("--- Full Description ---");
        println!("{}", full);
        println!();
    }

    Ok(())
}
