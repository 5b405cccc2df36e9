//! # Tengri Parser
//!
//! A crawler that walks the paginated news listings of
//! [Tengrinews](https://tengrinews.kz), extracts each article into a
//! structured record, and appends accepted records to a JSONL corpus
//! alongside a resumable seen-URL ledger.
//!
//! ## Features
//!
//! - Discovers article links from `/news/page/<n>/` listing pages
//! - Parses title, publish date, author, tags, and body text with layered
//!   fallbacks (meta tags, time elements, JSON-LD; itemprop and class-based
//!   content containers)
//! - Accepts only dated articles from the configured year range
//! - Fetches each page's articles concurrently over a bounded worker pool
//! - Resumes cleanly: already-captured URLs are skipped on re-runs
//!
//! ## Usage
//!
//! ```sh
//! tengri_parser --max-articles 50000 --workers 10
//! ```
//!
//! ## Architecture
//!
//! The application is a single pipeline:
//! 1. **Listing walk**: request listing page N, extract article links
//! 2. **Fan-out**: fetch unseen links concurrently, parse, filter by year
//! 3. **Persist**: append accepted records, checkpoint the ledger per page
//! 4. **Advance**: next page, until pagination or the quota ends the run

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod crawler;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use crawler::{CrawlOptions, crawl_listings};
use outputs::jsonl::RecordSink;
use outputs::seen::SeenSet;
use scrapers::tengri;
use utils::ensure_writable_dir;

/// File name of the append-only article corpus, under the output directory.
const JSONL_FILENAME: &str = "tengrinews_ru.jsonl";
/// File name of the seen-URL ledger, under the output directory.
const SEEN_FILENAME: &str = "seen_urls.txt";

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("tengri_parser starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: ensure the output dir exists and is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        tracing::error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // One explicitly built client shared by every fetch; headers identify the
    // crawler and ask for the site's Russian edition.
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        reqwest::header::HeaderValue::from_static(tengri::ACCEPT_LANGUAGE),
    );
    let client = reqwest::Client::builder()
        .user_agent(tengri::USER_AGENT)
        .default_headers(headers)
        .build()?;

    let output_dir = Path::new(&args.output_dir);
    let sink = RecordSink::new(output_dir.join(JSONL_FILENAME));
    let mut seen = SeenSet::load(output_dir.join(SEEN_FILENAME)).await?;
    info!(
        already_seen = seen.len(),
        jsonl = %sink.path().display(),
        "Persistence ready"
    );

    let options = CrawlOptions {
        start_page: args.start_page,
        end_page: args.end_page,
        max_articles: args.max_articles,
        workers: args.workers,
    };
    let summary = crawl_listings(&client, &options, &sink, &mut seen).await?;

    let elapsed = start_time.elapsed();
    info!(
        saved = summary.saved,
        stop_reason = ?summary.stop_reason,
        total_seen = seen.len(),
        ?elapsed,
        path = %sink.path().display(),
        "Saved articles"
    );

    Ok(())
}
