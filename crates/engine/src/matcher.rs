//! Nested term-group containment.
//!
//! `containsStrings` is a list of term groups. The text matches when any
//! group matches; a group matches when the text contains every one of its
//! terms. Plain substring checks, no pattern syntax.

use feed_model::TermGroup;

/// Term groups prepared for repeated matching.
///
/// Terms are case-folded once here so each entry only pays for folding
/// its own text.
#[derive(Debug, Clone, Default)]
pub struct StringMatcher {
    groups: Vec<Vec<String>>,
    case_sensitive: bool,
}

impl StringMatcher {
    pub fn new(term_groups: &[TermGroup], case_sensitive: bool) -> Self {
        let groups = term_groups
            .iter()
            .map(|group| {
                group
                    .terms()
                    .iter()
                    .map(|term| fold(term, case_sensitive))
                    .collect()
            })
            .collect();

        Self {
            groups,
            case_sensitive,
        }
    }

    /// True when no group is configured; such a matcher never matches
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.groups.is_empty() {
            return false;
        }

        let haystack = fold(text, self.case_sensitive);
        self.groups
            .iter()
            .any(|group| group.iter().all(|term| haystack.contains(term.as_str())))
    }
}

/// One-shot form of [`StringMatcher::matches`]
pub fn matches(text: &str, term_groups: &[TermGroup], case_sensitive: bool) -> bool {
    StringMatcher::new(term_groups, case_sensitive).matches(text)
}

fn fold(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}
