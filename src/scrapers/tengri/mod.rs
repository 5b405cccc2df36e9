//! Tengrinews scraper.
//!
//! Scrapes articles from [Tengrinews](https://tengrinews.kz), a Kazakhstani
//! news outlet with classic paginated listing pages.
//!
//! # URL Pattern
//!
//! Listing pages live at `https://tengrinews.kz/news/page/<n>/` and link to
//! articles shaped like `https://tengrinews.kz/<section>/<slug>-<id>/`, where
//! `<id>` is numeric. Navigation and category links don't carry the numeric
//! suffix, which is what lets [`extract_article_links`] tell them apart.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::models::ArticleRecord;

pub mod article;

/// The site origin all relative links resolve against.
pub const BASE_URL: &str = "https://tengrinews.kz";

/// Identifying client header sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; TengriParser/1.0; +https://example.org)";

/// Language preference header sent with every request.
pub const ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9";

/// Per-request timeout for article fetches.
const ARTICLE_TIMEOUT: Duration = Duration::from_secs(25);

/// Inclusive publish-year acceptance range.
const MIN_YEAR: i32 = 2024;
const MAX_YEAR: i32 = 2025;

/// Canonical article-URL shape: section, slug, numeric id, optional trailing slash.
static ARTICLE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://tengrinews\.kz/[^/]+/.+-(\d+)/?$").unwrap());

/// The listing-page URL for a 1-based page number.
pub fn listing_url(page: u32) -> String {
    format!("{BASE_URL}/news/page/{page}/")
}

/// Extract article links from a listing page.
///
/// Scans every `<a href>` in the markup, resolves relative links against
/// [`BASE_URL`], strips fragment identifiers, and keeps only URLs matching
/// the canonical article shape on the tengrinews.kz host.
///
/// # Returns
///
/// The matching URLs, deduplicated and sorted lexicographically so callers
/// process them in a deterministic order. Pure function; no network access.
pub fn extract_article_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();
    let base = Url::parse(BASE_URL).unwrap();

    let mut links = BTreeSet::new();
    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let absolute = if href.starts_with("http") {
            href.to_string()
        } else {
            match base.join(href) {
                Ok(resolved) => resolved.to_string(),
                Err(_) => continue,
            }
        };
        let canonical = absolute.split('#').next().unwrap_or_default();
        if canonical.contains("tengrinews.kz") && ARTICLE_URL_RE.is_match(canonical) {
            links.insert(canonical.to_string());
        }
    }

    links.into_iter().collect()
}

/// Fetch one article URL and produce a record if it passes the filters.
///
/// Performs a bounded-timeout GET, parses the page, and applies the
/// acceptance criteria: a parseable publish date with year in
/// [`MIN_YEAR`]..=[`MAX_YEAR`], a non-empty title, and a non-empty body.
///
/// Every failure mode short of a bug is an expected outcome here, so this
/// returns `None` rather than an error: network failures, non-200 statuses,
/// missing or unparseable dates, out-of-range years, and extraction misses
/// all just suppress the record. Safe to run many times concurrently; one
/// URL's failure never affects another's.
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn fetch_and_parse(client: &reqwest::Client, url: &str) -> Option<ArticleRecord> {
    let response = match client.get(url).timeout(ARTICLE_TIMEOUT).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "Article fetch failed");
            return None;
        }
    };
    if response.status() != StatusCode::OK {
        debug!(status = %response.status(), "Article fetch returned non-200");
        return None;
    }
    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Article body read failed");
            return None;
        }
    };

    let record = article::parse_article(&html, url);
    let year = record.published_year()?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        debug!(year, "Publish year outside acceptance range");
        return None;
    }
    if !record.is_complete() {
        debug!("Missing title or body text");
        return None;
    }
    Some(record)
}
