//! The condition evaluator.
//!
//! Combines atomic predicates, linked groups and the reversal flag into a
//! single keep/discard decision per entry.
//!
//! ## Algorithm
//! 1. effective(n) = atomic(n), inverted when `reverseConditions` is set
//! 2. Each linked group holds when all its conditions are effective
//!    (any of them under reversal)
//! 3. Group results fold into a [`LinkedResult`]
//! 4. Linked names are skipped as independent checks
//! 5. Non-reversed: discard if the link holds or any independent check does.
//!    Reversed: discard only if nothing disagrees: the link is not `False`,
//!    no independent check is false, and at least one of them voted yes.
//!
//! Under reversal a single dissenting check vetoes removal.

use crate::catalog::ConditionCatalog;
use crate::decision::{ConditionCheck, Decision, LinkedResult};
use feed_model::{ConditionName, Config, Entry};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Judges entries against one rule set and counts the ones it keeps.
///
/// The counter is the only mutable state. It is reset by whoever drives
/// pagination, never by the evaluator itself.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: Arc<Config>,
    catalog: ConditionCatalog,
    /// Enabled conditions that are not linked, in table order
    independent: Vec<ConditionName>,
    accepted: usize,
}

impl Evaluator {
    pub fn new(config: Arc<Config>) -> Self {
        let catalog = ConditionCatalog::new(&config);
        let linked = &config.options.linked_conditions;
        let independent = config
            .remove
            .enabled()
            .filter(|name| !linked.contains(*name))
            .collect();

        Self {
            config,
            catalog,
            independent,
            accepted: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Judge `entry` and update the accepted counter.
    ///
    /// Returns `true` when the entry should be discarded.
    pub fn evaluate(&mut self, entry: &Entry) -> bool {
        let decision = self.decide(entry);
        if decision.remove {
            debug!(id = %entry.id, linked = decision.linked.as_str(), "Discarding entry");
        } else {
            self.accepted += 1;
            debug!(id = %entry.id, accepted = self.accepted, "Keeping entry");
        }
        decision.remove
    }

    /// Judge `entry` without touching any state
    pub fn decide(&self, entry: &Entry) -> Decision {
        let reversed = self.config.options.reverse_conditions;

        let group_results: Vec<bool> = self
            .config
            .options
            .linked_conditions
            .groups()
            .iter()
            .map(|group| self.check_group(group, entry))
            .collect();
        let linked = LinkedResult::aggregate(&group_results, reversed);

        let checks: Vec<ConditionCheck> = self
            .independent
            .iter()
            .map(|&name| ConditionCheck {
                name,
                effective: self.effective(name, entry),
            })
            .collect();
        let any_check = checks.iter().any(|check| check.effective);
        let all_checks = checks.iter().all(|check| check.effective);

        let remove = match (reversed, linked) {
            (false, LinkedResult::True) => true,
            (false, LinkedResult::False | LinkedResult::None) => any_check,
            (true, LinkedResult::False) => false,
            (true, LinkedResult::True) => all_checks,
            // Nothing linked: every check must agree and there must be one
            (true, LinkedResult::None) => all_checks && any_check,
        };

        trace!(
            id = %entry.id,
            remove,
            reversed,
            linked = linked.as_str(),
            groups = ?group_results,
            "Evaluated entry"
        );

        Decision {
            remove,
            reversed,
            linked,
            group_results,
            checks,
        }
    }

    /// Entries kept since the last cycle reset
    pub fn accepted_count(&self) -> usize {
        self.accepted
    }

    /// Start a new pagination cycle
    pub fn reset_cycle(&mut self) {
        self.accepted = 0;
    }

    fn effective(&self, name: ConditionName, entry: &Entry) -> bool {
        let atomic = self.catalog.atomic(name, entry);
        if self.config.options.reverse_conditions {
            !atomic
        } else {
            atomic
        }
    }

    fn check_group(&self, group: &BTreeSet<ConditionName>, entry: &Entry) -> bool {
        if self.config.options.reverse_conditions {
            group.iter().any(|&name| self.effective(name, entry))
        } else {
            group.iter().all(|&name| self.effective(name, entry))
        }
    }
}
