//! Integration tests for the pagination loop.
//!
//! These run full cycles against file-backed and scripted sources.

use anyhow::{Result, anyhow};
use feed_model::{Entry, parse_config_str};
use feed_source::{
    CancelToken, CollectingSink, FeedSession, FeedSource, StopReason, json_lines_source,
    should_run,
};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Source that replays a fixed script of load results
struct ScriptedSource {
    script: VecDeque<Result<Option<Vec<Entry>>>>,
    cancel_after: Option<(usize, CancelToken)>,
    loads: usize,
}

impl ScriptedSource {
    fn new(script: Vec<Result<Option<Vec<Entry>>>>) -> Self {
        Self {
            script: script.into(),
            cancel_after: None,
            loads: 0,
        }
    }
}

impl FeedSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn load_more(&mut self) -> Result<Option<Vec<Entry>>> {
        self.loads += 1;
        if let Some((after, token)) = &self.cancel_after {
            if self.loads >= *after {
                token.cancel();
            }
        }
        self.script.pop_front().unwrap_or(Ok(None))
    }
}

fn session(json: &str) -> FeedSession {
    FeedSession::from_config(Arc::new(parse_config_str(json).unwrap()))
}

#[test]
fn test_cycle_over_json_lines_file() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"id": "1", "hasComments": true, "text": "Big SALE today"}}"#).unwrap();
    writeln!(file, r#"{{"id": "2", "hasComments": true, "text": "vacation pictures"}}"#).unwrap();
    writeln!(file, r#"{{"id": "3", "text": "no one replied"}}"#).unwrap();
    writeln!(file, r#"{{"id": "4", "hasComments": true, "text": "weekend plans"}}"#).unwrap();
    writeln!(file, r#"{{"id": "5", "hasComments": true, "text": "another post"}}"#).unwrap();

    let mut session = session(
        r#"{
            "remove": { "uncommented": true, "containsStrings": ["sale"] },
            "options": { "targetLoadCount": 2 }
        }"#,
    );
    let mut source = json_lines_source(file.path(), 2).unwrap();
    let mut sink = CollectingSink::new();

    let report = session
        .run_cycle(&mut source, &mut sink, &CancelToken::new())
        .unwrap();

    assert_eq!(report.stop, StopReason::TargetReached);
    assert_eq!(report.loads, 2);
    let kept: Vec<_> = sink.kept.iter().map(|e| e.id.as_str()).collect();
    let removed: Vec<_> = sink.removed.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(kept, vec!["2", "4"]);
    assert_eq!(removed, vec!["1", "3"]);
}

#[test]
fn test_missing_feed_file_is_an_error() {
    let result = json_lines_source(std::path::Path::new("/no/such/feed.jsonl"), 5);
    assert!(result.is_err());
}

#[test]
fn test_stalls_on_empty_loads() {
    let mut session = session("{}").with_max_empty_loads(2);
    let mut source = ScriptedSource::new(vec![
        Ok(Some(vec![Entry::new("one")])),
        Ok(Some(vec![])),
        Ok(Some(vec![])),
        Ok(Some(vec![Entry::new("never reached")])),
    ]);
    let mut sink = CollectingSink::new();

    let report = session
        .run_cycle(&mut source, &mut sink, &CancelToken::new())
        .unwrap();

    assert_eq!(report.stop, StopReason::Stalled);
    assert_eq!(report.loads, 3);
    assert_eq!(report.kept, 1);
}

#[test]
fn test_cancel_mid_cycle() {
    let cancel = CancelToken::new();
    let mut session = session(r#"{"options": {"targetLoadCount": 50}}"#);
    let mut source = ScriptedSource::new(vec![
        Ok(Some(vec![Entry::new("a")])),
        Ok(Some(vec![Entry::new("b")])),
        Ok(Some(vec![Entry::new("c")])),
    ]);
    source.cancel_after = Some((2, cancel.clone()));
    let mut sink = CollectingSink::new();

    let report = session.run_cycle(&mut source, &mut sink, &cancel).unwrap();

    // The batch that arrived with the cancel is still judged
    assert_eq!(report.stop, StopReason::Cancelled);
    assert_eq!(report.loads, 2);
    assert_eq!(sink.kept.len(), 2);
}

#[test]
fn test_source_error_propagates() {
    let mut session = session("{}");
    let mut source = ScriptedSource::new(vec![Err(anyhow!("connection reset"))]);
    let mut sink = CollectingSink::new();

    let err = session
        .run_cycle(&mut source, &mut sink, &CancelToken::new())
        .unwrap_err();

    assert!(err.to_string().contains("scripted"));
}

#[test]
fn test_routing_from_config() {
    let config = parse_config_str(r#"{"runOn": {"home": true, "search": false}}"#).unwrap();

    assert!(should_run(&config, "home"));
    assert!(!should_run(&config, "search"));
    assert!(!should_run(&config, "marketplace"));
}
