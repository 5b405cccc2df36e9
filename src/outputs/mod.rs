//! Persistence for crawl results.
//!
//! Two files make up the crawl's durable state:
//!
//! - [`jsonl`]: the append-only record sink, one JSON object per line
//! - [`seen`]: the deduplication ledger of already-captured URLs
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── tengrinews_ru.jsonl   # accepted article records, append-only
//! └── seen_urls.txt         # sorted URL ledger, overwritten each save
//! ```
//!
//! Together they make re-runs idempotent: the ledger tells the crawler which
//! URLs to skip, and the sink is never rewritten, so a second run against an
//! unchanged site appends nothing.

pub mod jsonl;
pub mod seen;
