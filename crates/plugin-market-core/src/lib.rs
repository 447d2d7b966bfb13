//! # Plugin Market Core
//!
//! Shared, I/O-free logic for Plugin Market: data models, the engagement
//! generator, the catalog source abstraction, and the search/filter/sort
//! engine.
//!
//! This crate contains no tokio, filesystem I/O, or other runtime-specific
//! dependencies. Everything except [`catalog::CatalogSource::fetch`] is
//! synchronous and pure.

pub mod catalog;
pub mod engagement;
pub mod models;
pub mod query;
