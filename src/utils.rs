//! Utility functions for date parsing and file system checks.
//!
//! This module provides helpers used throughout the application:
//! - Best-effort conversion of scraped date strings to timestamps
//! - File system validation for the output directory

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Date-time layouts tried, in order, after RFC 3339 fails.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, parsed as midnight.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Parse a scraped date string into a timestamp, best effort.
///
/// News pages carry dates in a handful of shapes: RFC 3339 in meta tags and
/// JSON-LD, naive date-times in `<time>` attributes, bare dates in visible
/// text. This tries each known layout in order and gives up quietly.
///
/// Strings without an explicit offset are taken as UTC. Date-only strings
/// resolve to midnight.
///
/// # Returns
///
/// The parsed timestamp, or `None` if no layout matched.
pub fn parse_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0).unwrap();
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return naive.and_local_timezone(utc).single();
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .and_then(|naive| naive.and_local_timezone(utc).single());
        }
    }

    debug!(raw = trimmed, "No date layout matched");
    None
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file. Run before any network
/// traffic so an unwritable output location fails the run up front instead of
/// after a page's worth of fetches.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_datetime("2024-05-06T12:30:00+06:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.offset().local_minus_utc(), 6 * 3600);
    }

    #[test]
    fn test_parse_rfc3339_zulu() {
        let dt = parse_datetime("2025-01-15T08:00:00Z").unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_datetime("2024-05-06T12:30:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 5, 6));

        let dt = parse_datetime("2024-05-06 12:30:00").unwrap();
        assert_eq!(dt.minute(), 30);

        let dt = parse_datetime("2024-05-06 12:30").unwrap();
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_datetime("2024-05-06").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 5, 6));
        assert_eq!(dt.hour(), 0);

        let dt = parse_datetime("06.05.2024").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 5, 6));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_datetime("  2024-05-06  ").is_some());
    }

    #[test]
    fn test_parse_failure_is_none() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("вчера"), None);
        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime("2024-13-45"), None);
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = std::env::temp_dir().join(format!("tengri_utils_{}", std::process::id()));
        let path = dir.to_str().unwrap().to_string();
        let _ = stdfs::remove_dir_all(&dir);

        assert!(ensure_writable_dir(&path).await.is_ok());
        assert!(dir.is_dir());

        let _ = stdfs::remove_dir_all(&dir);
    }
}
