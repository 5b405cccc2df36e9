//! News source scrapers.
//!
//! Each source gets its own submodule exposing the same two capabilities:
//!
//! 1. **Link discovery**: a pure function from listing-page HTML to the set
//!    of article URLs it references
//! 2. **Fetch-and-parse**: an async worker that downloads one article,
//!    extracts a structured record, and applies the source's acceptance
//!    filters
//!
//! # Supported Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | Tengrinews | [`tengri`] | Paginated `/news/page/<n>/` listings |
//!
//! # Common Patterns
//!
//! Scrapers use:
//! - Pure, fixture-testable extraction functions (no I/O inside parsing)
//! - Graceful error handling (failed fetches are logged and skipped)
//! - Date extraction from multiple sources (meta tags, time elements, JSON-LD)

pub mod tengri;
