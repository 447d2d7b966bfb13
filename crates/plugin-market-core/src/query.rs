//! Catalog query engine: free-text search, category filter, and sort.
//!
//! [`query`] is the single entry point every frontend delegates to. It is a
//! pure function of the catalog and a [`QuerySpec`]; it never mutates the
//! catalog and never fails.
//!
//! # Pipeline
//!
//! 1. **Text filter** (only when the trimmed term is non-empty). A record is
//!    kept when the whole lowercased term is a substring of its title,
//!    description, full description, company, or any tag, OR when any
//!    significant word of the term (longer than one character) is a
//!    substring of its title, description, full description, or any tag.
//! 2. **Category filter** (only for [`CategoryFilter::Exact`]): exact,
//!    case-sensitive equality with the record's category.
//! 3. **Sort** a copy of the survivors by the requested [`SortKey`]. The sort
//!    is stable, so ties keep catalog order.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::models::{CategoryFilter, PluginRecord, QuerySpec, SortKey};

/// Date-only layouts accepted for `updatedDate`; read as midnight UTC.
const DATE_FORMATS: [&str; 3] = ["%Y/%m/%d", "%Y-%m-%d", "%Y.%m.%d"];

/// Date-time layouts without an offset; read as UTC.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Run a query and return owned copies of the matching records, in order.
pub fn query(catalog: &[PluginRecord], spec: &QuerySpec) -> Vec<PluginRecord> {
    query_refs(catalog, spec).into_iter().cloned().collect()
}

/// Like [`query`], but borrows from the catalog instead of cloning.
pub fn query_refs<'a>(catalog: &'a [PluginRecord], spec: &QuerySpec) -> Vec<&'a PluginRecord> {
    let matcher = TextMatcher::new(&spec.search_term);

    let filtered: Vec<&PluginRecord> = catalog
        .iter()
        .filter(|p| matcher.as_ref().map_or(true, |m| m.matches(p)))
        .filter(|p| match &spec.category_filter {
            CategoryFilter::All => true,
            CategoryFilter::Exact(category) => &p.category == category,
        })
        .collect();

    sort_records(filtered, spec.sort_key)
}

/// Lowercased search term plus its significant words.
struct TextMatcher {
    term: String,
    words: Vec<String>,
}

impl TextMatcher {
    /// Returns `None` for a blank term, meaning "match everything".
    ///
    /// Word length is counted in UTF-16 code units, so a lone emoji or other
    /// astral character still counts as a significant word.
    fn new(search_term: &str) -> Option<Self> {
        let term = search_term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        let words = term
            .split(' ')
            .filter(|w| w.encode_utf16().count() > 1)
            .map(str::to_string)
            .collect();
        Some(Self { term, words })
    }

    fn matches(&self, record: &PluginRecord) -> bool {
        self.matches_whole_term(record) || self.matches_any_word(record)
    }

    fn matches_whole_term(&self, record: &PluginRecord) -> bool {
        let needle = self.term.as_str();
        contains_ci(Some(&record.title), needle)
            || contains_ci(record.description.as_deref(), needle)
            || contains_ci(record.full_description.as_deref(), needle)
            || contains_ci(record.company.as_deref(), needle)
            || record.tags.iter().any(|t| contains_ci(Some(t), needle))
    }

    // Company is deliberately absent from the word-level pass.
    fn matches_any_word(&self, record: &PluginRecord) -> bool {
        self.words.iter().any(|word| {
            let needle = word.as_str();
            contains_ci(Some(&record.title), needle)
                || contains_ci(record.description.as_deref(), needle)
                || contains_ci(record.full_description.as_deref(), needle)
                || record.tags.iter().any(|t| contains_ci(Some(t), needle))
        })
    }
}

/// Case-insensitive substring test; an absent haystack never matches.
/// `needle` must already be lowercase.
fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) => h.to_lowercase().contains(needle),
        None => false,
    }
}

fn sort_records(mut records: Vec<&PluginRecord>, key: SortKey) -> Vec<&PluginRecord> {
    match key {
        SortKey::Likes => records.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortKey::Downloads => records.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
        SortKey::Title => records.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::DateUploaded => {
            let mut keyed: Vec<(Option<DateTime<Utc>>, &PluginRecord)> = records
                .into_iter()
                .map(|p| (parse_updated_date(&p.updated_date), p))
                .collect();
            // None < Some(_), so reversing puts unparseable dates last.
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
            return keyed.into_iter().map(|(_, p)| p).collect();
        }
    }
    records
}

/// Dictionary-style title comparison: case folded first, raw text as the
/// tiebreaker so the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Parse an `updatedDate` value into an instant.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]` without an
/// offset (taken as UTC), and the date-only layouts `YYYY/MM/DD`,
/// `YYYY-MM-DD`, `YYYY.MM.DD` (taken as midnight UTC). Anything else is
/// `None`, which sorts as the oldest date.
pub fn parse_updated_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// One entry in the category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Distinct categories in first-seen order, with record counts.
pub fn categories(catalog: &[PluginRecord]) -> Vec<CategoryCount> {
    let mut out: Vec<CategoryCount> = Vec::new();
    for record in catalog {
        match out.iter_mut().find(|c| c.category == record.category) {
            Some(entry) => entry.count += 1,
            None => out.push(CategoryCount {
                category: record.category.clone(),
                count: 1,
            }),
        }
    }
    out
}
