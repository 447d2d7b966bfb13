//! # Plugin Market
//!
//! Catalog search for a geospatial visualization plugin marketplace.
//!
//! Plugin Market loads a catalog of plugin listings from a JSON file,
//! attaches stable engagement numbers (likes/downloads) to each listing,
//! and answers search/filter/sort queries over it from the `pmkt` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ JSON catalog │──▶│  annotate    │──▶│ query engine │──▶ pmkt output
//! │ (source)     │   │ likes/dl     │   │ filter+sort  │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! The pure pieces (models, engagement generator, query engine) live in
//! `plugin-market-core`; this crate adds configuration, the file source,
//! and the command entry points.
//!
//! ## Quick Start
//!
//! ```bash
//! pmkt search "weather data"
//! pmkt search --category visualizer --sort likes
//! pmkt get 3
//! pmkt categories
//! pmkt engagement 1 2 3
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`source_json`] | JSON file catalog source |
//! | [`catalog`] | Catalog loading and annotation |
//! | [`search`] | `pmkt search` |
//! | [`get`] | `pmkt get` |
//! | [`categories`] | `pmkt categories` |
//! | [`engagement_cmd`] | `pmkt engagement` |

pub mod catalog;
pub mod categories;
pub mod config;
pub mod engagement_cmd;
pub mod get;
pub mod search;
pub mod source_json;
