//! `pmkt engagement`: show generated likes/downloads for raw ids.
//!
//! Needs no catalog; handy for checking what a new listing will display
//! before it is added.

use anyhow::{Context, Result};
use plugin_market_core::models::{Engagement, PluginId};
use serde::Serialize;

#[derive(Serialize)]
struct EngagementRow {
    id: PluginId,
    #[serde(flatten)]
    engagement: Engagement,
}

pub fn run_engagement(ids: &[String], json: bool) -> Result<()> {
    let rows = ids
        .iter()
        .map(|raw| {
            let id: PluginId = raw
                .parse()
                .with_context(|| format!("invalid plugin id argument '{}'", raw))?;
            Ok(EngagementRow {
                id,
                engagement: id.engagement(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<8} {:>6} {:>9}", "ID", "LIKES", "DOWNLOADS");
    for row in &rows {
        println!(
            "{:<8} {:>6} {:>9}",
            row.id.get(),
            row.engagement.likes,
            row.engagement.downloads
        );
    }
    Ok(())
}
