//! The crawl orchestrator.
//!
//! A single coordinating task drives pagination sequentially and fans each
//! page's article fetches out over a bounded concurrent pool. The
//! orchestrator alone touches the seen-set and the record sink; workers just
//! hand their results back, so per-article state needs no locking.
//!
//! Pages are a hard barrier: page `p+1` is never dispatched until every
//! fetch for page `p` has completed (or the quota cut the page short). That
//! bounds in-flight work to one page's worth and makes the per-page ledger
//! flush a true checkpoint, at most one page is lost to a crash.
//!
//! Within a page, records land in the sink in completion order; nothing
//! depends on submission order.

use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::outputs::jsonl::RecordSink;
use crate::outputs::seen::SeenSet;
use crate::scrapers::tengri;

/// Per-request timeout for listing-page fetches.
const LISTING_TIMEOUT: Duration = Duration::from_secs(20);

/// Knobs for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// First listing page to visit (1-based).
    pub start_page: u32,
    /// Last listing page to visit, inclusive. Unbounded when `None`.
    pub end_page: Option<u32>,
    /// Stop after this many accepted articles. Unbounded when `None`.
    pub max_articles: Option<usize>,
    /// Concurrent article fetches per page.
    pub workers: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start_page: 1,
            end_page: None,
            max_articles: None,
            workers: 10,
        }
    }
}

/// Why the crawl stopped. Always one of these four; there is no error exit
/// from pagination itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured end page was passed.
    EndPageReached,
    /// A listing page returned 404, the site has no more pages.
    EndOfPagination,
    /// A listing page yielded no article links.
    NoLinksFound,
    /// The accepted-article quota was met.
    QuotaReached,
}

/// What a finished crawl did.
#[derive(Debug, Clone, Copy)]
pub struct CrawlSummary {
    /// Number of records appended to the sink.
    pub saved: usize,
    pub stop_reason: StopReason,
}

/// Candidate URLs not yet in the seen-set, listing order preserved.
fn filter_unseen(links: Vec<String>, seen: &SeenSet) -> Vec<String> {
    links.into_iter().filter(|url| !seen.contains(url)).collect()
}

fn quota_reached(max_articles: Option<usize>, saved: usize) -> bool {
    max_articles.is_some_and(|max| saved >= max)
}

/// Walk listing pages, fetch new articles concurrently, persist results.
///
/// Transient listing failures (connect errors, non-200 short of 404) skip to
/// the next page rather than ending the run; for a long crawl, irregular
/// pages are the normal case. Article-level failures are already absorbed by
/// [`tengri::fetch_and_parse`].
///
/// The ledger is flushed after every completed page and once more, eagerly,
/// when the quota stops the run mid-page. In-flight fetches for that final
/// page are abandoned.
///
/// # Errors
///
/// Only local I/O failures (sink append, ledger save) abort the crawl.
#[instrument(level = "info", skip_all, fields(start_page = options.start_page))]
pub async fn crawl_listings(
    client: &reqwest::Client,
    options: &CrawlOptions,
    sink: &RecordSink,
    seen: &mut SeenSet,
) -> Result<CrawlSummary, Box<dyn Error>> {
    let mut saved = 0usize;
    let mut page = options.start_page;

    let stop_reason = loop {
        if let Some(end) = options.end_page {
            if page > end {
                break StopReason::EndPageReached;
            }
        }

        let listing_url = tengri::listing_url(page);
        let response = match client.get(&listing_url).timeout(LISTING_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(page, error = %e, "Listing fetch failed; skipping page");
                page += 1;
                continue;
            }
        };
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            break StopReason::EndOfPagination;
        }
        if !status.is_success() {
            warn!(page, %status, "Listing returned non-success; skipping page");
            page += 1;
            continue;
        }
        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                warn!(page, error = %e, "Listing body read failed; skipping page");
                page += 1;
                continue;
            }
        };

        let links = tengri::extract_article_links(&html);
        if links.is_empty() {
            break StopReason::NoLinksFound;
        }
        let candidates = links.len();
        let new_links = filter_unseen(links, seen);
        info!(
            page,
            candidates,
            new = new_links.len(),
            "Dispatching article fetches"
        );

        let mut completions = stream::iter(new_links)
            .map(|url| async move { tengri::fetch_and_parse(client, &url).await })
            .buffer_unordered(options.workers.max(1));

        let mut quota_hit = false;
        while let Some(outcome) = completions.next().await {
            if let Some(record) = outcome {
                sink.append(&record).await?;
                seen.insert(record.url);
                saved += 1;
            }
            if quota_reached(options.max_articles, saved) {
                quota_hit = true;
                break;
            }
        }
        drop(completions);

        seen.save().await?;
        if quota_hit {
            break StopReason::QuotaReached;
        }

        info!(page, saved, "Page complete");
        page += 1;
    };

    info!(saved, ?stop_reason, "Crawl finished");
    Ok(CrawlSummary { saved, stop_reason })
}
