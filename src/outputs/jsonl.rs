//! The append-only record sink.
//!
//! Each accepted article is serialized to one line of JSON and appended to
//! the output file. The file is never rewritten or truncated, so repeated
//! runs against the same directory keep extending the same corpus.

use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use crate::models::ArticleRecord;

/// Appends article records to a JSONL file.
#[derive(Debug)]
pub struct RecordSink {
    path: PathBuf,
}

impl RecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single JSON line, creating the file on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails; the caller
    /// treats this as fatal since losing accepted records defeats the crawl.
    #[instrument(level = "debug", skip_all, fields(url = %record.url))]
    pub async fn append(&self, record: &ArticleRecord) -> Result<(), Box<dyn Error>> {
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        debug!(bytes = line.len(), "Appended record");
        Ok(())
    }
}
