//! The pagination loop.
//!
//! A cycle keeps triggering "load more" until enough entries survived the
//! evaluator, the source runs dry, or somebody cancels. Every entry of a
//! loaded batch is judged, even when the target is crossed half way through
//! the batch: the batch has already arrived.
//!
//! ## Algorithm
//! 1. Reset the evaluator's accepted counter
//! 2. While accepted < targetLoadCount:
//!    - stop if cancelled
//!    - load a batch; stop if the source is exhausted
//!    - stop after `max_empty_loads` empty batches in a row
//!    - judge each entry and hand it to the sink
//! 3. Report what happened

use crate::traits::{EntrySink, FeedSource};
use anyhow::{Context, Result};
use engine::Evaluator;
use feed_model::{Config, Entry};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument};

/// Default number of consecutive empty loads before a cycle gives up
pub const DEFAULT_MAX_EMPTY_LOADS: usize = 3;

/// Cancel affordance for a running cycle.
///
/// Clones share the same flag, so one copy can be handed to whatever
/// triggers cancellation while the session checks another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why a cycle stopped loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    Exhausted,
    Cancelled,
    Stalled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StopReason::TargetReached => "target reached",
            StopReason::Exhausted => "source exhausted",
            StopReason::Cancelled => "cancelled",
            StopReason::Stalled => "stalled on empty loads",
        };
        f.write_str(label)
    }
}

/// Outcome of one pagination cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Number of "load more" triggers, empty ones included
    pub loads: usize,
    pub kept: usize,
    pub removed: usize,
    pub stop: StopReason,
}

/// Drives an [`Evaluator`] over a [`FeedSource`], one cycle at a time.
pub struct FeedSession {
    evaluator: Evaluator,
    max_empty_loads: usize,
}

impl FeedSession {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            max_empty_loads: DEFAULT_MAX_EMPTY_LOADS,
        }
    }

    pub fn from_config(config: Arc<Config>) -> Self {
        Self::new(Evaluator::new(config))
    }

    /// Configure how many empty batches in a row end a cycle (default: 3)
    pub fn with_max_empty_loads(mut self, max: usize) -> Self {
        self.max_empty_loads = max.max(1);
        self
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn target_load_count(&self) -> usize {
        self.evaluator.config().options.target_load_count
    }

    /// Judge one arriving entry and pass it on.
    ///
    /// Returns `true` when the entry was removed.
    pub fn handle(&mut self, entry: Entry, sink: &mut dyn EntrySink) -> bool {
        let remove = self.evaluator.evaluate(&entry);
        if remove {
            sink.remove(entry);
        } else {
            sink.keep(entry);
        }
        remove
    }

    /// Run one pagination cycle
    #[instrument(skip_all, fields(source = source.name(), target = self.target_load_count()))]
    pub fn run_cycle(
        &mut self,
        source: &mut dyn FeedSource,
        sink: &mut dyn EntrySink,
        cancel: &CancelToken,
    ) -> Result<CycleReport> {
        self.evaluator.reset_cycle();
        let target = self.target_load_count();

        let mut loads = 0;
        let mut kept = 0;
        let mut removed = 0;
        let mut empty_loads = 0;

        let stop = loop {
            if self.evaluator.accepted_count() >= target {
                break StopReason::TargetReached;
            }
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            let batch = source
                .load_more()
                .with_context(|| format!("Failed to load more entries from '{}'", source.name()))?;
            let Some(batch) = batch else {
                break StopReason::Exhausted;
            };
            loads += 1;

            if batch.is_empty() {
                empty_loads += 1;
                debug!(empty_loads, "Load returned no entries");
                if empty_loads >= self.max_empty_loads {
                    break StopReason::Stalled;
                }
                continue;
            }
            empty_loads = 0;

            for entry in batch {
                if self.handle(entry, sink) {
                    removed += 1;
                } else {
                    kept += 1;
                }
            }
        };

        info!(loads, kept, removed, stop = %stop, "Cycle finished");
        Ok(CycleReport {
            loads,
            kept,
            removed,
            stop,
        })
    }
}
