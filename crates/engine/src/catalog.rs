//! The condition catalog: one atomic predicate per [`ConditionName`].
//!
//! An atomic predicate answers "does this entry match the removal
//! criterion", before any reversal or linking is applied. Dispatch goes
//! through a table indexed by [`ConditionName::index`], so every name has
//! exactly one predicate and there is no lookup that can miss.

use crate::matcher::StringMatcher;
use feed_model::{ConditionName, Config, Entry};

type Predicate = fn(&ConditionCatalog, &Entry) -> bool;

/// Indexed by `ConditionName::index()`, same order as `ConditionName::ALL`
const PREDICATES: [Predicate; ConditionName::COUNT] = [
    uncommented,
    unliked,
    text_only,
    has_image,
    has_video,
    contains_strings,
];

/// Atomic predicates over entries, bound to one rule set's string terms.
#[derive(Debug, Clone, Default)]
pub struct ConditionCatalog {
    matcher: StringMatcher,
}

impl ConditionCatalog {
    pub fn new(config: &Config) -> Self {
        Self {
            matcher: StringMatcher::new(
                &config.remove.contains_strings,
                config.options.case_sensitive,
            ),
        }
    }

    /// Whether `entry` matches `name`, ignoring reversal
    pub fn atomic(&self, name: ConditionName, entry: &Entry) -> bool {
        PREDICATES[name.index()](self, entry)
    }
}

fn uncommented(_: &ConditionCatalog, entry: &Entry) -> bool {
    !entry.has_comments
}

fn unliked(_: &ConditionCatalog, entry: &Entry) -> bool {
    !entry.has_likes
}

fn text_only(catalog: &ConditionCatalog, entry: &Entry) -> bool {
    entry.is_text_only
        && !catalog.atomic(ConditionName::Image, entry)
        && !catalog.atomic(ConditionName::Video, entry)
}

fn has_image(_: &ConditionCatalog, entry: &Entry) -> bool {
    entry.has_image
}

fn has_video(_: &ConditionCatalog, entry: &Entry) -> bool {
    entry.has_video
}

fn contains_strings(catalog: &ConditionCatalog, entry: &Entry) -> bool {
    catalog.matcher.matches(&entry.text)
}
