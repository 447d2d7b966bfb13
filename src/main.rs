//! # Plugin Market CLI (`pmkt`)
//!
//! Browse the plugin catalog from the terminal: search, filter by category,
//! sort, and inspect listings.
//!
//! ## Usage
//!
//! ```bash
//! pmkt --config ./config/pmkt.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pmkt search [term]` | Search, filter, and sort the catalog |
//! | `pmkt get <id>` | Show one listing in full |
//! | `pmkt categories` | List categories with plugin counts |
//! | `pmkt engagement <id>...` | Show generated likes/downloads for ids |
//!
//! ## Examples
//!
//! ```bash
//! # Everything, newest first
//! pmkt search
//!
//! # Most liked visualizers
//! pmkt search --category visualizer --sort likes
//!
//! # Free-text search, JSON output
//! pmkt search "weather data" --json
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;

use plugin_market::config::{self, Config};
use plugin_market::{categories, engagement_cmd, get, search};

const DEFAULT_CONFIG_PATH: &str = "./config/pmkt.toml";

/// Plugin Market CLI — search and browse a plugin catalog.
///
/// Commands that read the catalog accept a `--config` flag pointing to a
/// TOML configuration file. See `config/pmkt.example.toml`.
#[derive(Parser)]
#[command(
    name = "pmkt",
    about = "Plugin Market — search, filter, and sort a plugin catalog",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pmkt.toml`. When that default file is absent,
    /// built-in defaults are used and the catalog is read from
    /// `./data/plugins.json`.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the catalog.
    ///
    /// Matches the term case-insensitively against titles, descriptions,
    /// companies, and tags, then filters by category and sorts.
    Search {
        /// Free-text search term. Omit to list everything.
        term: Option<String>,

        /// Category to keep, or `all`.
        #[arg(long)]
        category: Option<String>,

        /// Sort key: `date_uploaded`, `likes`, `downloads`, or `title`.
        #[arg(long)]
        sort: Option<String>,

        /// Maximum number of results to print.
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a single plugin by id.
    Get {
        /// Plugin id.
        id: String,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List categories and how many plugins each holds.
    Categories,

    /// Show the generated likes/downloads for one or more plugin ids.
    ///
    /// Does not read the catalog.
    Engagement {
        /// Plugin ids (positive integers).
        #[arg(required = true)]
        ids: Vec<String>,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Initializes the tracing subscriber; logs go to stderr.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pmkt={level},plugin_market={level},plugin_market_core={level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the config file, falling back to defaults only when the default
/// path does not exist.
fn resolve_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
        warn!("no config at {}, using defaults", path.display());
        return Ok(Config::minimal());
    }
    config::load_config(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Commands that don't require config
    if let Commands::Engagement { ids, json } = &cli.command {
        return engagement_cmd::run_engagement(ids, *json);
    }

    let cfg = resolve_config(&cli.config)?;

    match cli.command {
        Commands::Search {
            term,
            category,
            sort,
            limit,
            json,
        } => {
            search::run_search(
                &cfg,
                term.as_deref(),
                category.as_deref(),
                sort.as_deref(),
                limit,
                json,
            )
            .await?;
        }
        Commands::Get { id, json } => {
            get::run_get(&cfg, &id, json).await?;
        }
        Commands::Categories => {
            categories::list_categories(&cfg).await?;
        }
        Commands::Engagement { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag_defaults_to_fallback_path() {
        let cli = Cli::try_parse_from(["pmkt", "categories"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_missing_default_config_uses_minimal() {
        let default = Path::new(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return;
        }
        let cfg = resolve_config(default).unwrap();
        assert_eq!(cfg.catalog.path, Config::minimal().catalog.path);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(resolve_config(&tmp.path().join("pmkt.toml")).is_err());
    }
}
