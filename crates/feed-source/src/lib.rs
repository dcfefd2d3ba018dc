//! # Feed Source Crate
//!
//! The collaborators around the evaluation engine: where entries come from,
//! where decisions go, and when to stop asking for more.
//!
//! ## Components
//!
//! - **traits**: `FeedSource` (batches of entries per "load more") and
//!   `EntrySink` (performs removal or retention)
//! - **memory**: `VecSource` and the JSON-lines file source
//! - **session**: `FeedSession`, the pagination loop with its cancel token
//! - **routing**: `runOn` feed-context check
//!
//! ## Example Usage
//!
//! ```ignore
//! use feed_source::{CancelToken, CollectingSink, FeedSession, json_lines_source};
//! use std::sync::Arc;
//!
//! let mut session = FeedSession::from_config(Arc::new(config));
//! let mut source = json_lines_source(path, 10)?;
//! let mut sink = CollectingSink::new();
//!
//! let report = session.run_cycle(&mut source, &mut sink, &CancelToken::new())?;
//! println!("kept {} / removed {} ({})", report.kept, report.removed, report.stop);
//! ```

// Public modules
pub mod memory;
pub mod routing;
pub mod session;
pub mod traits;

// Re-export commonly used types
pub use memory::{VecSource, json_lines_source};
pub use routing::should_run;
pub use session::{CancelToken, CycleReport, DEFAULT_MAX_EMPTY_LOADS, FeedSession, StopReason};
pub use traits::{CollectingSink, EntrySink, FeedSource};
