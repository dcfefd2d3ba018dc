//! Parsers for rule-set configs and feed files.
//!
//! - Config: a single JSON document (`remove`, `options`, `runOn`)
//! - Feed: JSON lines, one entry per line
//!
//! Parsing only checks the shape. Turning the raw config into a
//! [`Config`] the engine can use is done by [`crate::validate`].

use crate::error::{FeedModelError, Result};
use crate::types::*;
use crate::validate::validate_config;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

// =============================================================================
// Raw Config Shape
// =============================================================================

/// Config document exactly as written on disk
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub remove: RemoveRules,
    pub options: RawOptions,
    pub run_on: BTreeMap<String, bool>,
}

/// `options` section before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RawOptions {
    pub target_load_count: i64,
    pub case_sensitive: bool,
    pub reverse_conditions: bool,
    pub linked_conditions: Vec<RawLinkedItem>,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            target_load_count: DEFAULT_TARGET_LOAD_COUNT as i64,
            case_sensitive: false,
            reverse_conditions: false,
            linked_conditions: Vec::new(),
        }
    }
}

/// A `linkedConditions` item with names still as strings, so unknown
/// names can be reported precisely by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawLinkedItem {
    Name(String),
    Group(Vec<String>),
}

// =============================================================================
// Config Loading
// =============================================================================

/// Parse and validate a config document from a string
pub fn parse_config_str(raw: &str) -> Result<Config> {
    let raw: RawConfig = serde_json::from_str(raw)?;
    validate_config(raw)
}

/// Read, parse and validate a config file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = read_file(path)?;
    let config = parse_config_str(&content)?;
    debug!(
        path = %path.display(),
        linked_groups = config.options.linked_conditions.groups().len(),
        reverse = config.options.reverse_conditions,
        "Loaded config"
    );
    Ok(config)
}

// =============================================================================
// Feed Loading
// =============================================================================

/// Parse a JSON-lines feed.
///
/// `source_name` is only used in error messages. Blank lines are skipped.
pub fn parse_entries_str(content: &str, source_name: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let entry: Entry =
            serde_json::from_str(line_trimmed).map_err(|e| FeedModelError::ParseError {
                file: source_name.to_string(),
                line: idx + 1,
                reason: e.to_string(),
            })?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Read and parse a JSON-lines feed file
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let content = read_file(path)?;
    let entries = parse_entries_str(&content, &path.display().to_string())?;
    debug!(path = %path.display(), count = entries.len(), "Loaded feed");
    Ok(entries)
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FeedModelError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}
