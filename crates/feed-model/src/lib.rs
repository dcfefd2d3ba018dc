//! # Feed Model Crate
//!
//! Domain types shared by the feed filtering workspace, plus everything
//! needed to get a trustworthy rule set into memory.
//!
//! ## Main Components
//!
//! - **types**: `Entry`, `ConditionName`, `TermGroup`, `LinkedGroups`, `Config`
//! - **parser**: Read config documents and JSON-lines feeds
//! - **validate**: Reject malformed rule sets and normalize linked conditions
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use feed_model::{load_config, load_entries};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("rules.json"))?;
//! let entries = load_entries(Path::new("feed.jsonl"))?;
//!
//! println!("{} entries, reverse = {}", entries.len(), config.options.reverse_conditions);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod validate;

// Re-export commonly used types for convenience
pub use error::{FeedModelError, Result};
pub use parser::{load_config, load_entries, parse_config_str, parse_entries_str};
pub use types::{
    // Constants
    DEFAULT_TARGET_LOAD_COUNT,
    // Core types
    Config,
    Entry,
    LinkedGroups,
    Options,
    RemoveRules,
    // Enums
    ConditionName,
    LinkedItem,
    TermGroup,
};
pub use validate::validate_config;
