//! Batch sources backed by entries already in memory.

use crate::traits::FeedSource;
use anyhow::{Context, Result};
use feed_model::{Entry, load_entries};
use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;

/// Serves a fixed list of entries, `batch_size` at a time.
#[derive(Debug, Clone)]
pub struct VecSource {
    name: String,
    pending: VecDeque<Entry>,
    batch_size: usize,
}

impl VecSource {
    /// Create a new source over `entries`.
    ///
    /// A `batch_size` of zero is treated as one.
    pub fn new(entries: Vec<Entry>, batch_size: usize) -> Self {
        Self {
            name: "memory".to_string(),
            pending: entries.into(),
            batch_size: batch_size.max(1),
        }
    }

    /// Configure the name reported in logs (default: "memory")
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Entries not yet handed out
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FeedSource for VecSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_more(&mut self) -> Result<Option<Vec<Entry>>> {
        if self.pending.is_empty() {
            return Ok(None);
        }

        let take = self.batch_size.min(self.pending.len());
        let batch: Vec<Entry> = self.pending.drain(..take).collect();
        debug!(
            source = %self.name,
            batch = batch.len(),
            remaining = self.pending.len(),
            "Loaded batch"
        );
        Ok(Some(batch))
    }
}

/// Opens a JSON-lines feed file as a batch source.
///
/// The whole file is parsed up front so malformed lines are reported
/// before any entry is judged.
pub fn json_lines_source(path: &Path, batch_size: usize) -> Result<VecSource> {
    let entries = load_entries(path)
        .with_context(|| format!("Failed to load feed '{}'", path.display()))?;
    Ok(VecSource::new(entries, batch_size).with_name(path.display().to_string()))
}
