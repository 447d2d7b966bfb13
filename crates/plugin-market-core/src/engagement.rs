//! Deterministic engagement numbers for catalog listings.
//!
//! There is no backend to count likes or downloads, so every listing gets a
//! stable, plausible pair derived purely from its id. The mapping is a
//! sine-based hash:
//!
//! ```text
//! seed      = id × 1337
//! frac(x)   = x − ⌊x⌋
//! likes     = ⌊frac(sin(seed)     × 10000) × 500 ⌋ + 50     ∈ [50, 549]
//! downloads = ⌊frac(sin(seed + 1) × 10000) × 5000⌋ + 500    ∈ [500, 5499]
//! ```
//!
//! The same id yields the same pair in every process, so numbers stay put
//! across reloads. This is not a source of randomness and must not be used
//! as one.

use crate::models::{Engagement, PluginId};

const SEED_MULTIPLIER: f64 = 1337.0;
const HASH_SCALE: f64 = 10000.0;

const LIKES_SPAN: u32 = 500;
const LIKES_BASE: u32 = 50;
const DOWNLOADS_SPAN: u32 = 5000;
const DOWNLOADS_BASE: u32 = 500;

/// Derive the likes/downloads pair for a plugin id.
///
/// Total over `i64`; callers that need the positivity guarantee go through
/// [`PluginId`].
pub fn engagement_for(id: i64) -> Engagement {
    let seed = id as f64 * SEED_MULTIPLIER;
    Engagement {
        likes: bucket(sine_hash(seed), LIKES_SPAN) + LIKES_BASE,
        downloads: bucket(sine_hash(seed + 1.0), DOWNLOADS_SPAN) + DOWNLOADS_BASE,
    }
}

impl PluginId {
    /// Engagement numbers for this plugin.
    pub fn engagement(self) -> Engagement {
        engagement_for(self.get())
    }
}

/// `frac(sin(x) × 10000)`, in `[0, 1]`.
fn sine_hash(x: f64) -> f64 {
    let v = x.sin() * HASH_SCALE;
    v - v.floor()
}

/// Scale a unit value into `0..span`.
///
/// `frac` can round up to exactly `1.0` for tiny negative inputs; that case
/// lands in the top bucket.
fn bucket(unit: f64, span: u32) -> u32 {
    let scaled = (unit * span as f64).floor() as u32;
    scaled.min(span - 1)
}
