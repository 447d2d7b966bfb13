//! Core data models for the plugin catalog.
//!
//! [`RawPlugin`] is what a catalog source produces; [`PluginRecord`] is the
//! same listing after engagement numbers have been attached. [`QuerySpec`]
//! carries the user's current search intent into the query engine.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Unique plugin identifier.
///
/// Always a positive integer. Catalog files may spell it as a JSON number
/// or as a decimal string (`"7"`); anything else is rejected on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "IdRepr", into = "i64")]
pub struct PluginId(i64);

impl PluginId {
    pub fn new(value: i64) -> anyhow::Result<Self> {
        if value <= 0 {
            bail!("plugin id must be a positive integer, got {}", value);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PluginId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(v) => Self::new(v),
            Err(_) => bail!("plugin id must be an integer, got '{}'", s),
        }
    }
}

impl From<PluginId> for i64 {
    fn from(id: PluginId) -> i64 {
        id.0
    }
}

/// Wire representations accepted for a plugin id.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl TryFrom<IdRepr> for PluginId {
    type Error = anyhow::Error;

    fn try_from(repr: IdRepr) -> Result<Self, Self::Error> {
        match repr {
            IdRepr::Int(v) => PluginId::new(v),
            IdRepr::Float(v) => bail!("plugin id must be an integer, got {}", v),
            IdRepr::Text(s) => s.parse(),
        }
    }
}

/// A plugin listing as produced by a catalog source, before annotation.
///
/// Fields the catalog carries beyond the ones named here are kept in
/// `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlugin {
    pub id: PluginId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub updated_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A plugin listing with derived engagement counters attached.
///
/// Records are built once at catalog load and never mutated afterwards;
/// the query engine only ever produces reordered copies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub id: PluginId,
    pub title: String,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub company: Option<String>,
    pub tags: Vec<String>,
    pub category: String,
    pub updated_date: String,
    pub likes: u32,
    pub downloads: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PluginRecord {
    /// Attach engagement numbers to a raw listing.
    pub fn from_raw(raw: RawPlugin, engagement: Engagement) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            full_description: raw.full_description,
            company: raw.company,
            tags: raw.tags,
            category: raw.category,
            updated_date: raw.updated_date,
            likes: engagement.likes,
            downloads: engagement.downloads,
            extra: raw.extra,
        }
    }
}

/// Likes/downloads pair derived from a plugin id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Engagement {
    pub likes: u32,
    pub downloads: u32,
}

/// Category restriction applied by the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// The `"all"` sentinel: no restriction.
    #[default]
    All,
    /// Keep only records whose category is exactly this string.
    Exact(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Exact(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL),
            CategoryFilter::Exact(c) => f.write_str(c),
        }
    }
}

/// Ordering applied to the filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recently updated first.
    #[default]
    DateUploaded,
    Likes,
    Downloads,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateUploaded,
        SortKey::Likes,
        SortKey::Downloads,
        SortKey::Title,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateUploaded => "date_uploaded",
            SortKey::Likes => "likes",
            SortKey::Downloads => "downloads",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date_uploaded" => Ok(SortKey::DateUploaded),
            "likes" => Ok(SortKey::Likes),
            "downloads" => Ok(SortKey::Downloads),
            "title" => Ok(SortKey::Title),
            other => bail!(
                "Unknown sort key: '{}'. Use date_uploaded, likes, downloads, or title.",
                other
            ),
        }
    }
}

/// The user's current search intent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySpec {
    /// Free-text term; trimmed and lowercased before matching.
    pub search_term: String,
    pub category_filter: CategoryFilter,
    pub sort_key: SortKey,
}

impl QuerySpec {
    pub fn new(
        search_term: impl Into<String>,
        category_filter: CategoryFilter,
        sort_key: SortKey,
    ) -> Self {
        Self {
            search_term: search_term.into(),
            category_filter,
            sort_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plugin_id_accepts_number_and_numeric_string() {
        let a: PluginId = serde_json::from_value(json!(7)).unwrap();
        let b: PluginId = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(), 7);
    }

    #[test]
    fn test_plugin_id_rejects_non_numeric() {
        assert!(serde_json::from_value::<PluginId>(json!("weather")).is_err());
        assert!(serde_json::from_value::<PluginId>(json!(1.5)).is_err());
        assert!(serde_json::from_value::<PluginId>(json!(0)).is_err());
        assert!(serde_json::from_value::<PluginId>(json!(-3)).is_err());
        assert!(serde_json::from_value::<PluginId>(json!(null)).is_err());
    }

    #[test]
    fn test_raw_plugin_optional_fields() {
        let raw: RawPlugin = serde_json::from_value(json!({
            "id": 1,
            "title": "Tile Server",
            "category": "visualizer",
            "tags": null,
            "version": "1.2.0"
        }))
        .unwrap();
        assert!(raw.description.is_none());
        assert!(raw.full_description.is_none());
        assert!(raw.tags.is_empty());
        assert_eq!(raw.updated_date, "");
        assert_eq!(raw.extra.get("version"), Some(&json!("1.2.0")));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let raw: RawPlugin = serde_json::from_value(json!({
            "id": 3,
            "title": "Terrain",
            "fullDescription": "Long text",
            "category": "cms",
            "updatedDate": "2024/01/01"
        }))
        .unwrap();
        let record = PluginRecord::from_raw(
            raw,
            Engagement {
                likes: 60,
                downloads: 600,
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["fullDescription"], json!("Long text"));
        assert_eq!(value["updatedDate"], json!("2024/01/01"));
        assert_eq!(value["likes"], json!(60));
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "All".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Exact("All".to_string())
        );
    }

    #[test]
    fn test_sort_key_parse() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        let err = "popularity".parse::<SortKey>().unwrap_err();
        assert!(err.to_string().contains("Unknown sort key"));
    }
}
