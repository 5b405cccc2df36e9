//! The seen-URL ledger.
//!
//! A plain text file, one URL per line, sorted, UTF-8. Loaded once at
//! startup and fully overwritten on each save. Losing the very last page's
//! worth of inserts to a crash is acceptable; re-fetching a handful of
//! articles is cheap and the sink tolerates duplicates being skipped.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// The set of article URLs already captured, backed by a ledger file.
///
/// Owned and mutated exclusively by the crawl orchestrator; workers only
/// report outcomes back, so no locking is needed.
#[derive(Debug)]
pub struct SeenSet {
    path: PathBuf,
    urls: HashSet<String>,
}

impl SeenSet {
    /// Load the ledger, or start empty if the file doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error for any I/O failure other than the file being absent.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let urls: HashSet<String> = match fs::read_to_string(&path).await {
            Ok(contents) => contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(e),
        };
        info!(path = %path.display(), count = urls.len(), "Loaded seen-URL ledger");
        Ok(Self { path, urls })
    }

    /// Whether a URL has already been captured.
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Record a URL as captured. Returns false if it was already present.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.urls.insert(url.into())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the ledger file with the current set, sorted.
    #[instrument(level = "debug", skip_all, fields(count = self.urls.len()))]
    pub async fn save(&self) -> io::Result<()> {
        let mut sorted: Vec<&str> = self.urls.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        fs::write(&self.path, sorted.join("\n")).await?;
        debug!(path = %self.path.display(), "Saved seen-URL ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tengri_{}_{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let path = temp_path("seen_missing");
        let _ = std::fs::remove_file(&path);

        let seen = SeenSet::load(&path).await.unwrap();
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_contains() {
        let path = temp_path("seen_insert");
        let _ = std::fs::remove_file(&path);

        let mut seen = SeenSet::load(&path).await.unwrap();
        assert!(seen.insert("https://tengrinews.kz/a_news/one-1/"));
        assert!(!seen.insert("https://tengrinews.kz/a_news/one-1/"));
        assert!(seen.contains("https://tengrinews.kz/a_news/one-1/"));
        assert!(!seen.contains("https://tengrinews.kz/a_news/two-2/"));
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let path = temp_path("seen_roundtrip");
        let _ = std::fs::remove_file(&path);

        let mut seen = SeenSet::load(&path).await.unwrap();
        seen.insert("https://tengrinews.kz/b_news/second-2/");
        seen.insert("https://tengrinews.kz/a_news/first-1/");
        seen.save().await.unwrap();

        let reloaded = SeenSet::load(&path).await.unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("https://tengrinews.kz/a_news/first-1/"));
        assert!(reloaded.contains("https://tengrinews.kz/b_news/second-2/"));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_save_writes_sorted_lines() {
        let path = temp_path("seen_sorted");
        let _ = std::fs::remove_file(&path);

        let mut seen = SeenSet::load(&path).await.unwrap();
        seen.insert("https://tengrinews.kz/z_news/last-9/");
        seen.insert("https://tengrinews.kz/a_news/first-1/");
        seen.insert("https://tengrinews.kz/m_news/middle-5/");
        seen.save().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        let mut expected = lines.clone();
        expected.sort_unstable();
        assert_eq!(lines, expected);
        assert_eq!(lines.len(), 3);

        let _ = std::fs::remove_file(&path);
    }
}
