//! Loader: read a weight table from YAML (JSON is accepted as a YAML subset)
//! and return a validated `WeightedSet`. No network I/O.
//!
//! Accepted document shapes (document order is kept):
//! - sequence of single-pair mappings:  `- 3: Goblin`
//! - sequence of two-element sequences: `- [3, Goblin]`
//! - a top-level mapping:               `3: Goblin`
//!
//! Weights are integers, floats (taken exactly from their shortest decimal
//! form) or strings in ratio syntax (`"1/3"`, `"0.25"`). Labels may be
//! strings, numbers or booleans; they are kept as text.

#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use dt_core::{Ratio, WeightedEntry, WeightedSet};
use serde_yaml::Value;
use tracing::debug;

use crate::{IoError, IoResult};

/// Read and parse a weight table from `path`.
pub fn load_weight_table(path: &Path) -> IoResult<WeightedSet> {
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let set = parse_weight_table(&text)?;
    debug!(path = %path.display(), rows = set.len(), "loaded weight table");
    Ok(set)
}

/// Parse a weight table from document text.
pub fn parse_weight_table(text: &str) -> IoResult<WeightedSet> {
    let doc: Value = serde_yaml::from_str(text)?;
    let entries = match doc {
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| sequence_row(index, item))
            .collect::<IoResult<Vec<_>>>()?,
        Value::Mapping(map) => map
            .into_iter()
            .enumerate()
            .map(|(index, (w, l))| entry(index, w, l))
            .collect::<IoResult<Vec<_>>>()?,
        Value::Null => Vec::new(),
        other => {
            return Err(IoError::Row {
                index: 0,
                msg: format!("expected a list or mapping of rows, found {}", kind(&other)),
            })
        }
    };
    Ok(WeightedSet::new(entries)?)
}

fn sequence_row(index: usize, item: Value) -> IoResult<WeightedEntry> {
    match item {
        Value::Mapping(map) if map.len() == 1 => {
            let (w, l) = map.into_iter().next().ok_or_else(|| row_err(index, "empty row"))?;
            entry(index, w, l)
        }
        Value::Sequence(pair) if pair.len() == 2 => {
            let mut it = pair.into_iter();
            match (it.next(), it.next()) {
                (Some(w), Some(l)) => entry(index, w, l),
                _ => Err(row_err(index, "expected [weight, label]")),
            }
        }
        Value::Tagged(tagged) => sequence_row(index, tagged.value),
        other => Err(row_err(
            index,
            format!("expected `weight: label` or [weight, label], found {}", kind(&other)),
        )),
    }
}

fn entry(index: usize, weight: Value, label: Value) -> IoResult<WeightedEntry> {
    let weight: Ratio = serde_yaml::from_value(weight)
        .map_err(|e| row_err(index, format!("bad weight: {e}")))?;
    Ok(WeightedEntry::new(weight, label_text(index, label)?))
}

fn label_text(index: usize, label: Value) -> IoResult<String> {
    match label {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Tagged(tagged) => label_text(index, tagged.value),
        other => Err(row_err(index, format!("label must be text, found {}", kind(&other)))),
    }
}

fn row_err(index: usize, msg: impl Into<String>) -> IoError {
    IoError::Row { index, msg: msg.into() }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
