//! Seams between the engine and the outside world.
//!
//! A [`FeedSource`] produces entries in batches, one batch per "load more".
//! An [`EntrySink`] receives every entry once the evaluator has judged it.

use anyhow::Result;
use feed_model::Entry;

/// Something that can be asked for more entries.
pub trait FeedSource {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Trigger one "load more".
    ///
    /// # Returns
    /// * `Ok(Some(batch))` - Newly arrived entries, possibly empty
    /// * `Ok(None)` - The source is exhausted
    /// * `Err` - If loading fails
    fn load_more(&mut self) -> Result<Option<Vec<Entry>>>;
}

/// Performs the side effect of a decision.
pub trait EntrySink {
    /// The evaluator asked for this entry to be discarded
    fn remove(&mut self, entry: Entry);

    /// The entry survived evaluation
    fn keep(&mut self, entry: Entry);
}

/// Sink that simply records both outcomes in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub kept: Vec<Entry>,
    pub removed: Vec<Entry>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntrySink for CollectingSink {
    fn remove(&mut self, entry: Entry) {
        self.removed.push(entry);
    }

    fn keep(&mut self, entry: Entry) {
        self.kept.push(entry);
    }
}
