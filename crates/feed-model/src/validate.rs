//! Config validation.
//!
//! The engine assumes a well-formed rule set and never re-checks it.
//! Everything it relies on is enforced here, once, before a [`Config`]
//! exists:
//! - `targetLoadCount` is at least 1
//! - `containsStrings` has no empty groups and no blank terms
//! - `linkedConditions` only names known conditions and has no empty groups

use crate::error::{FeedModelError, Result};
use crate::parser::{RawConfig, RawLinkedItem};
use crate::types::*;
use tracing::warn;

/// Turn a raw config document into a validated, normalized [`Config`]
pub fn validate_config(raw: RawConfig) -> Result<Config> {
    let target_load_count = validate_target_load_count(raw.options.target_load_count)?;
    validate_term_groups(&raw.remove.contains_strings)?;
    let linked_items = validate_linked_items(&raw.options.linked_conditions)?;
    let linked_conditions = LinkedGroups::normalize(&linked_items);

    for name in linked_conditions.flat() {
        if raw.remove.is_enabled(*name) {
            // Harmless, but the independent flag never takes effect
            warn!(
                condition = %name,
                "Condition is both enabled and linked; the link takes precedence"
            );
        }
    }

    Ok(Config {
        remove: raw.remove,
        options: Options {
            target_load_count,
            case_sensitive: raw.options.case_sensitive,
            reverse_conditions: raw.options.reverse_conditions,
            linked_conditions,
        },
        run_on: raw.run_on,
    })
}

fn validate_target_load_count(value: i64) -> Result<usize> {
    if value < 1 {
        return Err(FeedModelError::InvalidValue {
            field: "options.targetLoadCount".to_string(),
            value: value.to_string(),
        });
    }
    usize::try_from(value).map_err(|_| FeedModelError::InvalidValue {
        field: "options.targetLoadCount".to_string(),
        value: value.to_string(),
    })
}

fn validate_term_groups(groups: &[TermGroup]) -> Result<()> {
    for (idx, group) in groups.iter().enumerate() {
        if group.terms().is_empty() {
            return Err(FeedModelError::ValidationError(format!(
                "remove.containsStrings[{idx}] is an empty group"
            )));
        }
        if group.terms().iter().any(|term| term.trim().is_empty()) {
            return Err(FeedModelError::ValidationError(format!(
                "remove.containsStrings[{idx}] contains a blank term"
            )));
        }
    }
    Ok(())
}

fn validate_linked_items(items: &[RawLinkedItem]) -> Result<Vec<LinkedItem>> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| -> Result<LinkedItem> {
            match item {
                RawLinkedItem::Name(name) => Ok(LinkedItem::Name(name.parse()?)),
                RawLinkedItem::Group(names) => {
                    if names.is_empty() {
                        return Err(FeedModelError::ValidationError(format!(
                            "options.linkedConditions[{idx}] is an empty group"
                        )));
                    }
                    let names = names
                        .iter()
                        .map(|name| name.parse())
                        .collect::<Result<Vec<ConditionName>>>()?;
                    Ok(LinkedItem::Group(names))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_config_str;

    #[test]
    fn test_zero_target_load_count_rejected() {
        let result = parse_config_str(r#"{"options": {"targetLoadCount": 0}}"#);
        assert!(matches!(
            result,
            Err(FeedModelError::InvalidValue { ref field, .. }) if field == "options.targetLoadCount"
        ));
    }

    #[test]
    fn test_negative_target_load_count_rejected() {
        let result = parse_config_str(r#"{"options": {"targetLoadCount": -3}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_term_group_rejected() {
        let result = parse_config_str(r#"{"remove": {"containsStrings": ["ok", []]}}"#);
        assert!(matches!(result, Err(FeedModelError::ValidationError(_))));
    }

    #[test]
    fn test_blank_term_rejected() {
        let result = parse_config_str(r#"{"remove": {"containsStrings": [["a", "  "]]}}"#);
        assert!(matches!(result, Err(FeedModelError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_linked_name_rejected() {
        let result = parse_config_str(r#"{"options": {"linkedConditions": ["images", "gifs"]}}"#);
        match result {
            Err(FeedModelError::InvalidValue { value, .. }) => assert_eq!(value, "gifs"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_linked_group_rejected() {
        let result = parse_config_str(r#"{"options": {"linkedConditions": [["images"], []]}}"#);
        assert!(matches!(result, Err(FeedModelError::ValidationError(_))));
    }

    #[test]
    fn test_flat_linked_list_is_one_group() {
        let config =
            parse_config_str(r#"{"options": {"linkedConditions": ["images", "unliked"]}}"#)
                .unwrap();
        let linked = &config.options.linked_conditions;

        assert_eq!(linked.groups().len(), 1);
        assert!(linked.groups()[0].contains(&ConditionName::Image));
        assert!(linked.groups()[0].contains(&ConditionName::Unliked));
    }

    #[test]
    fn test_mixed_linked_list_splits_bare_names() {
        let config = parse_config_str(
            r#"{"options": {"linkedConditions": ["text", ["images", "videos"]]}}"#,
        )
        .unwrap();
        let linked = &config.options.linked_conditions;

        assert_eq!(linked.groups().len(), 2);
        assert_eq!(linked.groups()[0].len(), 1);
        assert_eq!(linked.groups()[1].len(), 2);
        assert_eq!(linked.flat().len(), 3);
    }
}
