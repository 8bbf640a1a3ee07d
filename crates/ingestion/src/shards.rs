//! Shard merging module
//!
//! Concatenates a directory of JSON array files into one collection.

use lineage_common::errors::{PipelineError, Result};
use lineage_common::store::read_json;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Records merged from a set of shards
#[derive(Debug, Clone, Default)]
pub struct MergedShards {
    /// Records in shard order, then in-file order
    pub records: Vec<Value>,
    /// Shards that contributed, in merge order
    pub shards: Vec<PathBuf>,
}

/// List shard files in `dir`: regular files carrying `extension`.
///
/// With `sorted`, shards come back in file-name order; otherwise in whatever
/// order the filesystem yields them.
pub fn discover_shards(dir: &Path, extension: &str, sorted: bool) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut shards = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::io(dir, e))?.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().map(|e| e == extension).unwrap_or(false) {
            shards.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-shard file");
        }
    }

    if sorted {
        shards.sort();
    }

    Ok(shards)
}

/// Read every shard and concatenate their records. Any unreadable or
/// malformed shard aborts the merge.
pub fn merge_shards(paths: &[PathBuf]) -> Result<MergedShards> {
    let mut merged = MergedShards::default();

    for path in paths {
        let records = read_shard(path)?;
        debug!(path = %path.display(), records = records.len(), "Shard read");
        merged.records.extend(records);
        merged.shards.push(path.clone());
    }

    Ok(merged)
}

/// Discover and merge the shards of one directory
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn merge_directory(dir: &Path, extension: &str, sorted: bool) -> Result<MergedShards> {
    let paths = discover_shards(dir, extension, sorted)?;
    let merged = merge_shards(&paths)?;

    info!(
        shards = merged.shards.len(),
        records = merged.records.len(),
        "Shards merged"
    );

    Ok(merged)
}

fn read_shard(path: &Path) -> Result<Vec<Value>> {
    match read_json::<Value>(path)? {
        Value::Array(records) => {
            if let Some(pos) = records.iter().position(|r| !r.is_object()) {
                return Err(PipelineError::InvalidShard {
                    path: path.to_path_buf(),
                    message: format!("element {} is not an object", pos),
                });
            }
            Ok(records)
        }
        other => Err(PipelineError::InvalidShard {
            path: path.to_path_buf(),
            message: format!("expected a JSON array, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
