//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the crawler.
///
/// Paging bounds, the article quota, and the worker-pool width are the whole
/// configuration surface; everything else about the target site is fixed.
///
/// # Examples
///
/// ```sh
/// # Crawl from page 1 until pagination runs out
/// tengri_parser
///
/// # Backfill pages 50-100 with a wider pool
/// tengri_parser -s 50 -e 100 -w 20
///
/// # Stop after 500 accepted articles
/// tengri_parser --max-articles 500
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// First listing page to visit (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub start_page: u32,

    /// Last listing page to visit, inclusive
    #[arg(short, long)]
    pub end_page: Option<u32>,

    /// Stop after this many accepted articles
    #[arg(short, long)]
    pub max_articles: Option<usize>,

    /// Concurrent article fetches per page
    #[arg(short, long, default_value_t = 10)]
    pub workers: usize,

    /// Directory for the JSONL output and the seen-URL ledger
    #[arg(short, long, default_value = "data_tengrinews")]
    pub output_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["tengri_parser"]);
        assert_eq!(cli.start_page, 1);
        assert_eq!(cli.end_page, None);
        assert_eq!(cli.max_articles, None);
        assert_eq!(cli.workers, 10);
        assert_eq!(cli.output_dir, "data_tengrinews");
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "tengri_parser",
            "--start-page",
            "5",
            "--end-page",
            "9",
            "--max-articles",
            "100",
            "--workers",
            "4",
            "--output-dir",
            "/tmp/corpus",
        ]);
        assert_eq!(cli.start_page, 5);
        assert_eq!(cli.end_page, Some(9));
        assert_eq!(cli.max_articles, Some(100));
        assert_eq!(cli.workers, 4);
        assert_eq!(cli.output_dir, "/tmp/corpus");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["tengri_parser", "-s", "2", "-e", "3", "-m", "10", "-w", "8"]);
        assert_eq!(cli.start_page, 2);
        assert_eq!(cli.end_page, Some(3));
        assert_eq!(cli.max_articles, Some(10));
        assert_eq!(cli.workers, 8);
    }
}
