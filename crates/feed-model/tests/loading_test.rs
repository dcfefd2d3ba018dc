//! Integration tests for loading configs and feeds from disk.

use feed_model::{ConditionName, FeedModelError, load_config, load_entries};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_temp(
        r#"{
            "remove": { "unliked": true, "containsStrings": ["sponsored"] },
            "options": {
                "targetLoadCount": 3,
                "reverseConditions": true,
                "linkedConditions": ["images", "videos"]
            },
            "runOn": { "home": true }
        }"#,
    );

    let config = load_config(file.path()).unwrap();

    assert!(config.remove.unliked);
    assert!(config.options.reverse_conditions);
    assert_eq!(config.options.target_load_count, 3);
    assert_eq!(config.options.linked_conditions.groups().len(), 1);
    assert!(config.options.linked_conditions.contains(ConditionName::Image));
    assert!(!config.options.linked_conditions.contains(ConditionName::Unliked));
}

#[test]
fn test_load_config_rejects_bad_json() {
    let file = write_temp("{ \"remove\": ");
    let result = load_config(file.path());
    assert!(matches!(result, Err(FeedModelError::InvalidConfig(_))));
}

#[test]
fn test_load_entries_from_file() {
    let file = write_temp(
        "{\"id\": \"1\", \"hasComments\": true, \"text\": \"first\"}\n\
         {\"id\": \"2\", \"hasVideo\": true, \"hasLikes\": true, \"text\": \"second\"}\n",
    );

    let entries = load_entries(file.path()).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "1");
    assert!(entries[0].has_comments);
    assert!(entries[1].has_video);
    assert!(entries[1].has_likes);
    assert!(!entries[1].is_text_only);
}
