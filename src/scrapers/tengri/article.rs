//! Article-page extraction.
//!
//! Turns one article page's HTML into an [`ArticleRecord`] using layered
//! fallback heuristics. Everything in this module is pure: no network, no
//! shared state, so each heuristic is testable against saved HTML fixtures.
//!
//! # Extraction strategy
//!
//! - **Title**: first `<h1>`.
//! - **Publish date**, first hit wins: named meta properties in priority
//!   order, then the first `<time>` element (machine attribute, then visible
//!   text), then `datePublished` inside any JSON-LD block.
//! - **Body**: paragraphs from `itemprop="articleBody"` containers and from
//!   containers with content-ish class names, whole document as a last
//!   resort; deduplicated, junk-filtered, newline-joined.
//! - **Author/tags**: profile and tag links by href shape.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::ArticleRecord;
use crate::utils::parse_datetime;

/// Meta property names that may carry the publish date, highest priority first.
const META_DATE_PROPERTIES: [&str; 3] = [
    "article:published_time",
    "og:article:published_time",
    "og:updated_time",
];

/// Boilerplate markers: paragraphs starting with one of these are not content.
const JUNK_PREFIXES: [&str; 6] = [
    "Читайте также",
    "TENGRI",
    "Фото:",
    "Видео:",
    "Поделиться",
    "ПОСЛЕДНИЕ НОВОСТИ",
];

/// Class names that mark article-content containers.
static CONTENT_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("content|article|tn-text|tn-article").unwrap());

/// Parse an article page into a record.
///
/// Missing pieces leave the corresponding field unset rather than failing
/// the whole extraction; the caller decides whether the record is usable.
pub fn parse_article(html: &str, url: &str) -> ArticleRecord {
    let document = Html::parse_document(html);

    let published = extract_published(&document);
    let published_dt = published.as_deref().and_then(parse_datetime);

    ArticleRecord {
        url: url.to_string(),
        title: extract_title(&document),
        published,
        published_dt,
        author: extract_author(&document),
        tags: extract_tags(&document),
        text: extract_body(&document),
    }
}

/// Element text with each fragment trimmed, joined by single spaces.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_title(document: &Html) -> Option<String> {
    let h1 = Selector::parse("h1").unwrap();
    document.select(&h1).next().map(element_text)
}

/// The raw publish-date string, from the first heuristic that yields one.
fn extract_published(document: &Html) -> Option<String> {
    for property in META_DATE_PROPERTIES {
        let selector = Selector::parse(&format!("meta[property=\"{property}\"]")).unwrap();
        let content = document
            .select(&selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .filter(|content| !content.is_empty());
        if let Some(content) = content {
            return Some(content.to_string());
        }
    }

    let time = Selector::parse("time").unwrap();
    if let Some(element) = document.select(&time).next() {
        if let Some(datetime) = element.value().attr("datetime").filter(|v| !v.is_empty()) {
            return Some(datetime.to_string());
        }
        let text = element_text(element);
        if !text.is_empty() {
            return Some(text);
        }
    }

    let script = Selector::parse("script[type=\"application/ld+json\"]").unwrap();
    for block in document.select(&script) {
        let raw = block.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<serde_json::Value>(raw.trim()) else {
            continue;
        };
        if let Some(date) = date_published(&value) {
            return Some(date);
        }
    }

    None
}

/// `datePublished` from a JSON-LD value: an object, or the first object in
/// an array that carries it.
fn date_published(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => map
            .get("datePublished")
            .and_then(|date| date.as_str())
            .map(str::to_string),
        serde_json::Value::Array(items) => items.iter().find_map(date_published),
        _ => None,
    }
}

fn extract_body(document: &Html) -> String {
    let itemprop_selector = Selector::parse("[itemprop=\"articleBody\"]").unwrap();
    let class_selector = Selector::parse("[class]").unwrap();
    let paragraph_selector = Selector::parse("p").unwrap();

    // Two container strategies, evaluated in order and concatenated.
    let mut candidates: Vec<ElementRef> = document.select(&itemprop_selector).collect();
    candidates.extend(document.select(&class_selector).filter(|element| {
        element
            .value()
            .attr("class")
            .is_some_and(|class| CONTENT_CLASS_RE.is_match(class))
    }));
    if candidates.is_empty() {
        candidates.push(document.root_element());
    }

    let paragraphs: Vec<String> = candidates
        .iter()
        .flat_map(|container| container.select(&paragraph_selector))
        .map(element_text)
        .filter(|text| !text.is_empty())
        .unique()
        .collect();

    assemble_body(paragraphs)
}

/// Junk-filter paragraphs and join them into the body text.
///
/// After dropping junk-prefixed paragraphs, any later recurrence of the
/// first retained paragraph is dropped too. Some pages re-render the lead
/// caption mid-body; the rule is deliberately limited to the first paragraph
/// so legitimately repeated phrases elsewhere survive.
pub(crate) fn assemble_body(paragraphs: Vec<String>) -> String {
    let retained: Vec<String> = paragraphs
        .into_iter()
        .filter(|text| !JUNK_PREFIXES.iter().any(|junk| text.starts_with(junk)))
        .collect();

    let Some(first) = retained.first().cloned() else {
        return String::new();
    };
    retained
        .iter()
        .enumerate()
        .filter(|(index, text)| *index == 0 || **text != first)
        .map(|(_, text)| text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_author(document: &Html) -> Option<String> {
    let author_link = Selector::parse("a[href*=\"/author/\"]").unwrap();
    document
        .select(&author_link)
        .next()
        .map(element_text)
        .filter(|name| !name.is_empty())
}

fn extract_tags(document: &Html) -> Option<Vec<String>> {
    let tag_link = Selector::parse("a[href*=\"/tag/\"]").unwrap();
    let tags: Vec<String> = document.select(&tag_link).map(element_text).collect();
    if tags.is_empty() { None } else { Some(tags) }
}
