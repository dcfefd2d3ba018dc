//! Core domain types for feed filtering.
//!
//! This module defines the data structures shared by every crate in the
//! workspace: the entries being classified, the closed set of condition
//! names, the string-term configuration and the normalized rule set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::FeedModelError;

/// Default number of kept entries a pagination cycle aims for
pub const DEFAULT_TARGET_LOAD_COUNT: usize = 10;

// =============================================================================
// Entry
// =============================================================================

/// One unit of content subject to a keep/discard decision.
///
/// Only semantic attributes are carried; how they were extracted from the
/// page is the event source's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryRecord", rename_all = "camelCase")]
pub struct Entry {
    /// Opaque label for reporting; never consulted by the engine
    pub id: String,
    pub has_comments: bool,
    pub has_likes: bool,
    pub has_image: bool,
    pub has_video: bool,
    /// True only when the entry carries no image/video payload
    pub is_text_only: bool,
    /// Full visible text used for string matching
    pub text: String,
}

impl Entry {
    /// Creates a text-only entry with no comments and no likes
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            has_comments: false,
            has_likes: false,
            has_image: false,
            has_video: false,
            is_text_only: true,
            text: text.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_comments(mut self, has_comments: bool) -> Self {
        self.has_comments = has_comments;
        self
    }

    pub fn with_likes(mut self, has_likes: bool) -> Self {
        self.has_likes = has_likes;
        self
    }

    /// Sets the image flag and recomputes `is_text_only`
    pub fn with_image(mut self, has_image: bool) -> Self {
        self.has_image = has_image;
        self.is_text_only = !(self.has_image || self.has_video);
        self
    }

    /// Sets the video flag and recomputes `is_text_only`
    pub fn with_video(mut self, has_video: bool) -> Self {
        self.has_video = has_video;
        self.is_text_only = !(self.has_image || self.has_video);
        self
    }

    /// Overrides `is_text_only` independently of the media flags
    pub fn with_text_only(mut self, is_text_only: bool) -> Self {
        self.is_text_only = is_text_only;
        self
    }
}

/// Wire shape of an entry: every flag is optional and `isTextOnly`
/// falls back to "no image and no video".
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EntryRecord {
    id: String,
    has_comments: bool,
    has_likes: bool,
    has_image: bool,
    has_video: bool,
    is_text_only: Option<bool>,
    text: String,
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        let is_text_only = record
            .is_text_only
            .unwrap_or(!(record.has_image || record.has_video));
        Self {
            id: record.id,
            has_comments: record.has_comments,
            has_likes: record.has_likes,
            has_image: record.has_image,
            has_video: record.has_video,
            is_text_only,
            text: record.text,
        }
    }
}

// =============================================================================
// Condition Names
// =============================================================================

/// The closed set of removal criteria.
///
/// Declaration order doubles as the table index used by the condition
/// catalog, see [`ConditionName::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionName {
    #[serde(rename = "uncommented")]
    Uncommented,
    #[serde(rename = "unliked")]
    Unliked,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "images")]
    Image,
    #[serde(rename = "videos")]
    Video,
    #[serde(rename = "containsStrings")]
    ContainsStrings,
}

impl ConditionName {
    pub const COUNT: usize = 6;

    pub const ALL: [ConditionName; Self::COUNT] = [
        ConditionName::Uncommented,
        ConditionName::Unliked,
        ConditionName::Text,
        ConditionName::Image,
        ConditionName::Video,
        ConditionName::ContainsStrings,
    ];

    /// Position of this name in [`ConditionName::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The name as written in config files
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionName::Uncommented => "uncommented",
            ConditionName::Unliked => "unliked",
            ConditionName::Text => "text",
            ConditionName::Image => "images",
            ConditionName::Video => "videos",
            ConditionName::ContainsStrings => "containsStrings",
        }
    }
}

impl fmt::Display for ConditionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionName {
    type Err = FeedModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| FeedModelError::InvalidValue {
                field: "condition name".to_string(),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// String Terms
// =============================================================================

/// One unit of the `containsStrings` configuration.
///
/// A bare string matches on its own; a list matches only when every
/// string in it is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermGroup {
    Single(String),
    All(Vec<String>),
}

impl TermGroup {
    /// The strings that must all be present for this group to match
    pub fn terms(&self) -> &[String] {
        match self {
            TermGroup::Single(term) => std::slice::from_ref(term),
            TermGroup::All(terms) => terms,
        }
    }
}

impl From<&str> for TermGroup {
    fn from(term: &str) -> Self {
        TermGroup::Single(term.to_string())
    }
}

impl From<Vec<&str>> for TermGroup {
    fn from(terms: Vec<&str>) -> Self {
        TermGroup::All(terms.into_iter().map(str::to_string).collect())
    }
}

// =============================================================================
// Linked Conditions
// =============================================================================

/// One item of the raw `linkedConditions` list: a bare name or a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkedItem {
    Name(ConditionName),
    Group(Vec<ConditionName>),
}

/// Linked conditions in canonical form: an ordered list of non-empty
/// groups plus the union of every name they mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedGroups {
    groups: Vec<BTreeSet<ConditionName>>,
    flat: BTreeSet<ConditionName>,
}

impl LinkedGroups {
    /// Normalizes the raw list.
    ///
    /// A list of bare names is one group holding all of them. As soon as the
    /// list contains a nested group, every item stands on its own and a bare
    /// name becomes a single-member group. Empty groups are dropped.
    pub fn normalize(items: &[LinkedItem]) -> Self {
        let has_nested = items
            .iter()
            .any(|item| matches!(item, LinkedItem::Group(_)));

        if !has_nested {
            let names = items.iter().filter_map(|item| match item {
                LinkedItem::Name(name) => Some(*name),
                LinkedItem::Group(_) => None,
            });
            return Self::from_groups([names.collect::<Vec<_>>()]);
        }

        Self::from_groups(items.iter().map(|item| match item {
            LinkedItem::Name(name) => vec![*name],
            LinkedItem::Group(names) => names.clone(),
        }))
    }

    /// Builds the canonical form from already-grouped names
    pub fn from_groups<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = ConditionName>,
    {
        let groups: Vec<BTreeSet<ConditionName>> = groups
            .into_iter()
            .map(|group| group.into_iter().collect::<BTreeSet<_>>())
            .filter(|group| !group.is_empty())
            .collect();
        let flat = groups.iter().flatten().copied().collect();
        Self { groups, flat }
    }

    pub fn groups(&self) -> &[BTreeSet<ConditionName>] {
        &self.groups
    }

    /// Union of all names across all groups
    pub fn flat(&self) -> &BTreeSet<ConditionName> {
        &self.flat
    }

    pub fn contains(&self, name: ConditionName) -> bool {
        self.flat.contains(&name)
    }

    /// True when no condition is linked at all
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// The `remove` section: which criteria discard an entry on their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RemoveRules {
    pub uncommented: bool,
    pub unliked: bool,
    pub text: bool,
    pub images: bool,
    pub videos: bool,
    pub contains_strings: Vec<TermGroup>,
}

impl RemoveRules {
    /// Whether `name` is switched on: `true` for structural flags, a
    /// non-empty term list for `containsStrings`.
    pub fn is_enabled(&self, name: ConditionName) -> bool {
        match name {
            ConditionName::Uncommented => self.uncommented,
            ConditionName::Unliked => self.unliked,
            ConditionName::Text => self.text,
            ConditionName::Image => self.images,
            ConditionName::Video => self.videos,
            ConditionName::ContainsStrings => !self.contains_strings.is_empty(),
        }
    }

    /// Mutable access to a structural flag; `None` for `containsStrings`
    pub fn flag_mut(&mut self, name: ConditionName) -> Option<&mut bool> {
        match name {
            ConditionName::Uncommented => Some(&mut self.uncommented),
            ConditionName::Unliked => Some(&mut self.unliked),
            ConditionName::Text => Some(&mut self.text),
            ConditionName::Image => Some(&mut self.images),
            ConditionName::Video => Some(&mut self.videos),
            ConditionName::ContainsStrings => None,
        }
    }

    /// Enabled names in table order
    pub fn enabled(&self) -> impl Iterator<Item = ConditionName> + '_ {
        ConditionName::ALL
            .into_iter()
            .filter(move |name| self.is_enabled(*name))
    }
}

/// The `options` section after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Kept entries a pagination cycle aims for (always >= 1)
    pub target_load_count: usize,
    pub case_sensitive: bool,
    pub reverse_conditions: bool,
    pub linked_conditions: LinkedGroups,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target_load_count: DEFAULT_TARGET_LOAD_COUNT,
            case_sensitive: false,
            reverse_conditions: false,
            linked_conditions: LinkedGroups::default(),
        }
    }
}

/// A validated, normalized rule set.
///
/// Built once (from a file through [`crate::parser::load_config`] or with the
/// `with_*` builders) and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub remove: RemoveRules,
    pub options: Options,
    /// Feed contexts this rule set applies to; consumed by routing only
    pub run_on: BTreeMap<String, bool>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns a structural condition on. `containsStrings` is enabled through
    /// [`Config::with_contains_strings`] instead and is ignored here.
    pub fn with_remove(mut self, name: ConditionName) -> Self {
        if let Some(flag) = self.remove.flag_mut(name) {
            *flag = true;
        }
        self
    }

    pub fn with_contains_strings<T: Into<TermGroup>>(
        mut self,
        groups: impl IntoIterator<Item = T>,
    ) -> Self {
        self.remove.contains_strings = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.options.case_sensitive = case_sensitive;
        self
    }

    pub fn with_reverse_conditions(mut self, reverse: bool) -> Self {
        self.options.reverse_conditions = reverse;
        self
    }

    pub fn with_linked_conditions(mut self, linked: LinkedGroups) -> Self {
        self.options.linked_conditions = linked;
        self
    }

    /// Sets the pagination target; zero is clamped to one
    pub fn with_target_load_count(mut self, count: usize) -> Self {
        self.options.target_load_count = count.max(1);
        self
    }

    pub fn with_run_on(mut self, context: impl Into<String>, enabled: bool) -> Self {
        self.run_on.insert(context.into(), enabled);
        self
    }
}
