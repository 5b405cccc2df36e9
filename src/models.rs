//! Data model for parsed articles.
//!
//! This module defines [`ArticleRecord`], the one record type the crawler
//! persists. Each accepted article becomes a single JSON object on its own
//! line of the output file, with the keys `url`, `title`, `published`,
//! `published_dt`, `author`, `tags`, `text`.
//!
//! Optional fields are serialized as `null` rather than omitted, so every
//! line carries the full key set and downstream readers never have to probe
//! for missing keys.

use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};

/// A parsed news article.
///
/// Produced by the article extractor from a single page's HTML. Most fields
/// are optional because extraction works on best-effort heuristics; the
/// crawler only persists records that pass [`ArticleRecord::is_complete`]
/// and the publish-year filter.
///
/// # Fields
///
/// * `url` - Canonical article URL, the record's unique key
/// * `title` - Text of the page's first `<h1>`, if any
/// * `published` - The raw publish-date string as found on the page
/// * `published_dt` - Parsed form of `published`; `None` when the raw string
///   is absent or unparseable
/// * `author` - Text of the first author-profile link, if any
/// * `tags` - Texts of the page's tag links in document order; `None` when
///   the page has no tag links
/// * `text` - Body paragraphs joined with newlines, deduplicated and
///   junk-filtered; may be empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The canonical article URL.
    pub url: String,
    /// The article headline.
    pub title: Option<String>,
    /// The publish date exactly as it appeared on the page.
    pub published: Option<String>,
    /// The publish date parsed to a timestamp, serialized as RFC 3339 or null.
    pub published_dt: Option<DateTime<FixedOffset>>,
    /// The article author.
    pub author: Option<String>,
    /// Topic tags, in the order they appear on the page.
    pub tags: Option<Vec<String>>,
    /// The extracted body text.
    pub text: String,
}

impl ArticleRecord {
    /// The 4-digit year of the parsed publish date, if one was parsed.
    pub fn published_year(&self) -> Option<i32> {
        self.published_dt.map(|dt| dt.year())
    }

    /// Whether the record has both a non-empty title and non-empty body text.
    ///
    /// Records failing this check are extraction misses and are never
    /// persisted.
    pub fn is_complete(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty()) && !self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            url: "https://tengrinews.kz/kazakhstan_news/test-article-123456/".to_string(),
            title: Some("Test article".to_string()),
            published: Some("2024-05-06T12:30:00+06:00".to_string()),
            published_dt: DateTime::parse_from_rfc3339("2024-05-06T12:30:00+06:00").ok(),
            author: Some("Reporter".to_string()),
            tags: Some(vec!["politics".to_string()]),
            text: "First paragraph.\nSecond paragraph.".to_string(),
        }
    }

    #[test]
    fn test_published_year() {
        assert_eq!(record().published_year(), Some(2024));
    }

    #[test]
    fn test_published_year_absent_without_parsed_date() {
        let mut rec = record();
        rec.published_dt = None;
        assert_eq!(rec.published_year(), None);
    }

    #[test]
    fn test_is_complete() {
        assert!(record().is_complete());
    }

    #[test]
    fn test_is_complete_rejects_missing_title() {
        let mut rec = record();
        rec.title = None;
        assert!(!rec.is_complete());

        rec.title = Some(String::new());
        assert!(!rec.is_complete());
    }

    #[test]
    fn test_is_complete_rejects_empty_body() {
        let mut rec = record();
        rec.text = String::new();
        assert!(!rec.is_complete());
    }

    #[test]
    fn test_serialization_key_order() {
        let json = serde_json::to_string(&record()).unwrap();
        let positions: Vec<usize> = [
            "\"url\"",
            "\"title\"",
            "\"published\"",
            "\"published_dt\"",
            "\"author\"",
            "\"tags\"",
            "\"text\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_serialization_rfc3339_date() {
        let json = serde_json::to_string(&record()).unwrap();
        assert!(json.contains("2024-05-06T12:30:00+06:00"));
    }

    #[test]
    fn test_missing_fields_serialize_as_null() {
        let rec = ArticleRecord {
            url: "https://tengrinews.kz/world_news/no-metadata-1/".to_string(),
            title: None,
            published: None,
            published_dt: None,
            author: None,
            tags: None,
            text: String::new(),
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert!(value["title"].is_null());
        assert!(value["published_dt"].is_null());
        assert!(value["tags"].is_null());
        assert_eq!(value["text"], "");
    }

    #[test]
    fn test_round_trip() {
        let json = serde_json::to_string(&record()).unwrap();
        let parsed: ArticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.url, record().url);
        assert_eq!(parsed.published_year(), Some(2024));
        assert_eq!(parsed.tags.unwrap(), vec!["politics".to_string()]);
    }
}
