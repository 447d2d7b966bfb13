//! Library-level tests: source → annotate → query.
//!
//! These run the full pipeline in-process against the same nine-listing
//! fixture that ships in `data/plugins.json`.

use plugin_market::source_json::{parse_catalog, JsonFileSource};
use plugin_market_core::catalog::load_catalog;
use plugin_market_core::catalog::memory::InMemorySource;
use plugin_market_core::engagement::engagement_for;
use plugin_market_core::models::{CategoryFilter, PluginRecord, QuerySpec, SortKey};
use plugin_market_core::query::{query, query_refs};

const FIXTURE: &str = include_str!("../data/plugins.json");

async fn fixture_catalog() -> Vec<PluginRecord> {
    let raw = parse_catalog(FIXTURE).unwrap();
    load_catalog(&InMemorySource::new(raw)).await.unwrap()
}

fn ids(records: &[PluginRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id.get()).collect()
}

#[tokio::test]
async fn test_likes_sort_end_to_end() {
    let catalog = fixture_catalog().await;
    assert_eq!(catalog.len(), 9);

    let spec = QuerySpec::new("", CategoryFilter::All, SortKey::Likes);
    let result = query(&catalog, &spec);
    assert_eq!(result.len(), 9);

    let max_id = (1..=9)
        .max_by_key(|id| engagement_for(*id).likes)
        .unwrap();
    assert_eq!(result[0].id.get(), max_id);
    assert_eq!(result[0].id.get(), 2);
    assert!(result.windows(2).all(|w| w[0].likes >= w[1].likes));
    assert_eq!(ids(&result), vec![2, 8, 1, 4, 7, 5, 9, 6, 3]);
}

#[tokio::test]
async fn test_default_spec_newest_first() {
    let catalog = fixture_catalog().await;
    let result = query(&catalog, &QuerySpec::default());
    assert_eq!(ids(&result), vec![3, 1, 9, 6, 2, 7, 5, 4, 8]);
}

#[tokio::test]
async fn test_weather_data_recall() {
    let catalog = fixture_catalog().await;
    let spec = QuerySpec::new("  Weather Data ", CategoryFilter::All, SortKey::DateUploaded);
    let result = query(&catalog, &spec);
    // Title hit on "weather", plus "data" in a tag and in "datasets".
    assert_eq!(ids(&result), vec![3, 6, 4]);
}

#[tokio::test]
async fn test_search_and_category_combined() {
    let catalog = fixture_catalog().await;
    let spec = QuerySpec::new(
        "3d",
        CategoryFilter::Exact("visualizer".to_string()),
        SortKey::Title,
    );
    let result = query(&catalog, &spec);
    assert_eq!(ids(&result), vec![1]);
}

#[tokio::test]
async fn test_query_leaves_catalog_untouched() {
    let catalog = fixture_catalog().await;
    let snapshot = catalog.clone();
    let ptr = catalog.as_ptr();

    for key in SortKey::ALL {
        let spec = QuerySpec::new("map", CategoryFilter::All, key);
        let _ = query(&catalog, &spec);
        let _ = query_refs(&catalog, &spec);
    }

    assert_eq!(catalog.as_ptr(), ptr);
    assert_eq!(catalog, snapshot);
}

#[tokio::test]
async fn test_refs_and_owned_agree() {
    let catalog = fixture_catalog().await;
    let spec = QuerySpec::new("layer", CategoryFilter::All, SortKey::Downloads);
    let owned = query(&catalog, &spec);
    let borrowed: Vec<PluginRecord> = query_refs(&catalog, &spec).into_iter().cloned().collect();
    assert_eq!(owned, borrowed);
}

#[tokio::test]
async fn test_json_file_source_matches_in_memory() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("plugins.json");
    std::fs::write(&path, FIXTURE).unwrap();

    let records = load_catalog(&JsonFileSource::new(&path)).await.unwrap();
    assert_eq!(records, fixture_catalog().await);
}
