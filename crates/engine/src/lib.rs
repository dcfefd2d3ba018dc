//! Condition evaluation engine for feed entries.
//!
//! This crate provides:
//! - StringMatcher for nested term-group containment
//! - ConditionCatalog mapping each condition name to an atomic predicate
//! - Evaluator combining predicates, linked groups and reversal into one
//!   keep/discard decision
//!
//! ## Architecture
//! The engine is a pure function of `(Entry, Config)` plus one counter:
//! 1. The catalog answers each atomic condition for an entry
//! 2. The evaluator applies reversal, linked groups and independent checks
//! 3. Kept entries bump the accepted counter the pagination loop reads
//!
//! ## Example Usage
//! ```ignore
//! use engine::Evaluator;
//! use feed_model::{load_config, Entry};
//! use std::sync::Arc;
//!
//! let config = Arc::new(load_config(path)?);
//! let mut evaluator = Evaluator::new(config);
//!
//! if evaluator.evaluate(&Entry::new("hello")) {
//!     // hand the entry to whoever removes it
//! }
//! println!("kept so far: {}", evaluator.accepted_count());
//! ```

pub mod catalog;
pub mod decision;
pub mod evaluator;
pub mod matcher;

// Re-export main types
pub use catalog::ConditionCatalog;
pub use decision::{ConditionCheck, Decision, LinkedResult};
pub use evaluator::Evaluator;
pub use matcher::StringMatcher;
