//! Decision values produced by the evaluator.

use feed_model::ConditionName;

/// Aggregate outcome of all linked groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedResult {
    /// No condition is linked; the decision rests on independent checks
    None,
    /// The linked groups vote for removal
    True,
    /// The linked groups vote against removal
    False,
}

impl LinkedResult {
    /// Folds per-group results into one value.
    ///
    /// At least one group must hold. Under reversal every group must hold.
    pub fn aggregate(group_results: &[bool], reverse: bool) -> Self {
        if group_results.is_empty() {
            return LinkedResult::None;
        }

        let any_true = group_results.iter().any(|held| *held);
        let any_false = group_results.iter().any(|held| !*held);

        if any_true && !(reverse && any_false) {
            LinkedResult::True
        } else {
            LinkedResult::False
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkedResult::None => "none",
            LinkedResult::True => "true",
            LinkedResult::False => "false",
        }
    }
}

/// Effective value of one independent (non-linked) condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionCheck {
    pub name: ConditionName,
    pub effective: bool,
}

/// Full account of how an entry was judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// `true` means discard
    pub remove: bool,
    pub reversed: bool,
    pub linked: LinkedResult,
    /// One result per linked group, in config order
    pub group_results: Vec<bool>,
    /// Enabled conditions not governed by a link, in table order
    pub checks: Vec<ConditionCheck>,
}
