//! Integration tests for the engine.
//!
//! These drive the evaluator from config documents, the same way the
//! binary does, and check the documented decision table end to end.

use engine::{Evaluator, LinkedResult};
use feed_model::{Entry, parse_config_str};
use std::sync::Arc;

fn evaluator_from(json: &str) -> Evaluator {
    Evaluator::new(Arc::new(parse_config_str(json).unwrap()))
}

#[test]
fn test_all_flags_off_never_discards() {
    let mut evaluator = evaluator_from(
        r#"{
            "remove": {
                "uncommented": false, "unliked": false, "text": false,
                "images": false, "videos": false, "containsStrings": []
            },
            "options": { "reverseConditions": false, "linkedConditions": [] }
        }"#,
    );

    for has_comments in [false, true] {
        for has_likes in [false, true] {
            for has_image in [false, true] {
                let entry = Entry::new("some words")
                    .with_comments(has_comments)
                    .with_likes(has_likes)
                    .with_image(has_image);
                assert!(!evaluator.evaluate(&entry));
            }
        }
    }
    assert_eq!(evaluator.accepted_count(), 8);
}

#[test]
fn test_string_rules_from_config() {
    let evaluator = evaluator_from(
        r#"{
            "remove": { "containsStrings": [["foo", "bar"], "baz"] },
            "options": { "caseSensitive": false }
        }"#,
    );

    assert!(evaluator.decide(&Entry::new("this has FOO and bar")).remove);
    assert!(!evaluator.decide(&Entry::new("only foo here")).remove);
    assert!(evaluator.decide(&Entry::new("contains baz")).remove);
}

#[test]
fn test_link_overrides_independent_enablement() {
    let evaluator = evaluator_from(
        r#"{
            "remove": { "images": false, "videos": false },
            "options": { "linkedConditions": [["images", "videos"]] }
        }"#,
    );

    let both = Entry::new("clip").with_image(true).with_video(true);
    assert!(evaluator.decide(&both).remove);

    let image_only = Entry::new("pic").with_image(true);
    let decision = evaluator.decide(&image_only);
    assert_eq!(decision.linked, LinkedResult::False);
    assert!(!decision.remove);
}

#[test]
fn test_empty_link_list_is_none() {
    let evaluator = evaluator_from(
        r#"{
            "remove": { "unliked": true },
            "options": { "linkedConditions": [] }
        }"#,
    );

    let entries = [
        Entry::new("a"),
        Entry::new("b").with_likes(true),
        Entry::new("c").with_video(true),
    ];
    for entry in &entries {
        let decision = evaluator.decide(entry);
        assert_eq!(decision.linked, LinkedResult::None);
        assert_eq!(decision.remove, !entry.has_likes);
    }
}

#[test]
fn test_flat_link_list_behaves_as_one_group() {
    let flat = evaluator_from(r#"{"options": {"linkedConditions": ["images", "unliked"]}}"#);
    let nested = evaluator_from(r#"{"options": {"linkedConditions": [["images", "unliked"]]}}"#);

    let entries = [
        Entry::new("a").with_image(true),
        Entry::new("b").with_image(true).with_likes(true),
        Entry::new("c"),
    ];
    for entry in &entries {
        assert_eq!(flat.decide(entry), nested.decide(entry));
    }
    assert!(flat.decide(&entries[0]).remove);
    assert!(!flat.decide(&entries[1]).remove);
    assert!(!flat.decide(&entries[2]).remove);
}

#[test]
fn test_reverse_keeps_only_what_would_be_removed() {
    let evaluator = evaluator_from(
        r#"{
            "remove": { "uncommented": true },
            "options": { "reverseConditions": true }
        }"#,
    );

    // Non-reversed this rule would discard uncommented entries; reversed it
    // discards the commented ones and keeps the rest
    assert!(evaluator.decide(&Entry::new("busy").with_comments(true)).remove);
    assert!(!evaluator.decide(&Entry::new("quiet")).remove);
}

#[test]
fn test_reverse_mixed_link_and_strings() {
    let evaluator = evaluator_from(
        r#"{
            "remove": { "containsStrings": ["sale"] },
            "options": {
                "reverseConditions": true,
                "linkedConditions": [["images", "videos"]]
            }
        }"#,
    );

    // Link holds (no video) and the inverted string check holds (no "sale")
    let decision = evaluator.decide(&Entry::new("holiday photos").with_image(true));
    assert_eq!(decision.linked, LinkedResult::True);
    assert!(decision.remove);

    // Mentions "sale": the string check dissents
    assert!(!evaluator.decide(&Entry::new("big SALE").with_image(true)).remove);
}
