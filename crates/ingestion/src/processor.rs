//! Ingestion processor
//!
//! Core flow for building the canonical dataset: shard merge, name
//! normalization, advisor materialization, ordering and id assignment.

use crate::export::write_new_names;
use crate::materialize::{dated_before, materialize_advisors, unresolved_advisors};
use crate::normalize::normalize_names;
use crate::ordering::order_and_number;
use crate::shards::merge_directory;
use lineage_common::config::AppConfig;
use lineage_common::errors::Result;
use lineage_common::metrics::{self, StageMetrics};
use lineage_common::models::decode_records;
use lineage_common::store::{read_json, write_json};
use lineage_common::Researcher;
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Canonical collection plus what it took to build it
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Sorted records with ids `1..N`
    pub records: Vec<Researcher>,
    /// Names that received a placeholder record, in creation order
    pub synthesized: Vec<String>,
    /// Records whose scalar name was rewritten into a list
    pub normalized: usize,
}

/// Turn merged raw records into the canonical collection. Pure: no I/O.
pub fn preprocess_records(merged: Vec<Value>, placeholder_award_date: &str) -> Result<Preprocessed> {
    let (values, normalized) = normalize_names(merged);
    let records = decode_records(values)?;
    let materialized = materialize_advisors(records, placeholder_award_date);
    debug_assert!(unresolved_advisors(&materialized.records).is_empty());

    if !materialized.synthesized.is_empty() {
        let earlier = dated_before(&materialized.records, placeholder_award_date);
        if earlier > 0 {
            warn!(
                records = earlier,
                placeholder_award_date,
                "Records predate the placeholder date and will sort ahead of placeholders"
            );
        }
    }

    let records = order_and_number(materialized.records);

    Ok(Preprocessed {
        records,
        synthesized: materialized.synthesized,
        normalized,
    })
}

/// Ingestion processor bound to one configuration
pub struct IngestionProcessor {
    config: AppConfig,
}

impl IngestionProcessor {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Merge the shard directory and persist the merged collection
    #[instrument(skip(self), fields(dir = %self.config.data.shard_dir.display()))]
    pub fn merge(&self) -> Result<Vec<Value>> {
        let timer = StageMetrics::start("merge");
        let data = &self.config.data;

        let merged = merge_directory(&data.shard_dir, &data.shard_extension, data.sort_shards)?;
        if merged.shards.is_empty() {
            warn!("No shard files found");
        }

        let path = data.merged_path();
        write_json(&path, &merged.records)?;

        metrics::record_merge(merged.shards.len(), merged.records.len());
        info!(
            path = %path.display(),
            records = merged.records.len(),
            elapsed_secs = timer.finish(),
            "Merged collection written"
        );

        Ok(merged.records)
    }

    /// Build the canonical collection from the persisted merged file
    pub fn preprocess_from_disk(&self) -> Result<Preprocessed> {
        let merged: Vec<Value> = read_json(&self.config.data.merged_path())?;
        self.preprocess(merged)
    }

    /// Build and persist the canonical collection, then export the names
    /// that were synthesized along the way.
    #[instrument(skip_all, fields(records = merged.len()))]
    pub fn preprocess(&self, merged: Vec<Value>) -> Result<Preprocessed> {
        let timer = StageMetrics::start("preprocess");
        let data = &self.config.data;

        let outcome = preprocess_records(merged, &self.config.pipeline.placeholder_award_date)?;

        let path = data.processed_path();
        write_json(&path, &outcome.records)?;

        if data.snapshot_dated {
            let snapshot = data.snapshot_path(chrono::Local::now().date_naive());
            write_json(&snapshot, &outcome.records)?;
            info!(path = %snapshot.display(), "Dated snapshot written");
        }

        // The names sheet is advisory; the canonical file is already in place
        let names_path = data.new_names_path();
        match write_new_names(&names_path, &outcome.synthesized) {
            Ok(()) => info!(
                path = %names_path.display(),
                count = outcome.synthesized.len(),
                "Synthesized names exported"
            ),
            Err(e) => warn!(path = %names_path.display(), error = %e, "Failed to export synthesized names"),
        }

        metrics::record_preprocess(outcome.normalized, outcome.synthesized.len());
        info!(
            path = %path.display(),
            records = outcome.records.len(),
            placeholders = outcome.synthesized.len(),
            normalized = outcome.normalized,
            elapsed_secs = timer.finish(),
            "Canonical collection written"
        );

        Ok(outcome)
    }

    /// Merge then preprocess
    pub fn run(&self) -> Result<Preprocessed> {
        let merged = self.merge()?;
        self.preprocess(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_common::PipelineError;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.data_dir = dir.path().to_path_buf();
        config.data.shard_dir = dir.path().join("json");
        config
    }

    #[test]
    fn test_preprocess_scenario() {
        let merged = vec![
            json!({"name": "A", "advisors": ["B"], "award_date": "2020-01"}),
            json!({"name": ["C"], "advisors": [], "award_date": "2019-06"}),
        ];

        let out = preprocess_records(merged, "1990-01").unwrap();

        assert_eq!(out.normalized, 1);
        assert_eq!(out.synthesized, vec!["B".to_string()]);
        let summary: Vec<(&str, Option<u32>)> = out
            .records
            .iter()
            .map(|r| (r.primary_name(), r.id))
            .collect();
        assert_eq!(summary, vec![("B", Some(1)), ("C", Some(2)), ("A", Some(3))]);
        assert_eq!(out.records[0].award_date, "1990-01");
    }

    #[test]
    fn test_preprocess_fails_fast_on_missing_field() {
        let merged = vec![json!({"name": "A", "award_date": "2020-01"})];
        let err = preprocess_records(merged, "1990-01").unwrap_err();
        assert!(matches!(err, PipelineError::SchemaViolation { index: 0, .. }));
    }

    #[test]
    fn test_run_writes_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        fs::create_dir(&config.data.shard_dir).unwrap();
        fs::write(
            config.data.shard_dir.join("01.json"),
            r#"[{"name":"A","advisors":["B"],"award_date":"2020-01"}]"#,
        )
        .unwrap();
        fs::write(
            config.data.shard_dir.join("02.json"),
            r#"[{"name":["C"],"advisors":[],"award_date":"2019-06"}]"#,
        )
        .unwrap();

        let processor = IngestionProcessor::new(config.clone());
        let out = processor.run().unwrap();
        assert_eq!(out.records.len(), 3);

        let merged: Vec<Value> = read_json(&config.data.merged_path()).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0]["name"], json!("A"));
        assert!(merged[0].get("id").is_none());

        let processed: Vec<Value> = read_json(&config.data.processed_path()).unwrap();
        assert_eq!(processed[2]["name"], json!(["A"]));
        assert_eq!(processed[2]["id"], json!(3));

        let sheet = fs::read_to_string(config.data.new_names_path()).unwrap();
        assert_eq!(sheet, "name\nB\n");
    }

    #[test]
    fn test_early_record_sorts_ahead_of_placeholder() {
        let merged = vec![
            json!({"name": "A", "advisors": ["B"], "award_date": "1985-03"}),
            json!({"name": "C", "advisors": [], "award_date": "2019-06"}),
        ];

        let out = preprocess_records(merged, "1990-01").unwrap();
        let summary: Vec<(&str, Option<u32>)> = out
            .records
            .iter()
            .map(|r| (r.primary_name(), r.id))
            .collect();
        assert_eq!(summary, vec![("A", Some(1)), ("B", Some(2)), ("C", Some(3))]);
    }

    #[test]
    fn test_names_export_failure_does_not_fail_run() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        fs::create_dir_all(config.data.new_names_path()).unwrap();

        let out = IngestionProcessor::new(config.clone())
            .preprocess(vec![json!({"name": "A", "advisors": ["B"], "award_date": "2020-01"})])
            .unwrap();

        assert_eq!(out.synthesized, vec!["B".to_string()]);
        assert!(config.data.processed_path().is_file());
        assert!(config.data.new_names_path().is_dir());
        let processed: Vec<Value> = read_json(&config.data.processed_path()).unwrap();
        assert_eq!(processed.len(), 2);
    }

    #[test]
    fn test_padded_award_date_rejected() {
        let merged = vec![
            json!({"name": "A", "advisors": [], "award_date": "2020-01"}),
            json!({"name": "B", "advisors": [], "award_date": "2020- 1"}),
        ];
        let err = preprocess_records(merged, "1990-01").unwrap_err();
        assert!(matches!(err, PipelineError::SchemaViolation { index: 1, .. }));
    }

    #[test]
    fn test_failed_preprocess_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let processor = IngestionProcessor::new(config.clone());

        let err = processor
            .preprocess(vec![json!({"name": [], "advisors": [], "award_date": "2020-01"})])
            .unwrap_err();
        assert!(matches!(err, PipelineError::SchemaViolation { .. }));
        assert!(!config.data.processed_path().exists());
        assert!(!config.data.new_names_path().exists());
    }

    #[test]
    fn test_dated_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config.data.snapshot_dated = true;

        IngestionProcessor::new(config.clone())
            .preprocess(vec![json!({"name": "Solo", "advisors": [], "award_date": "2020-01"})])
            .unwrap();

        let snapshots: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("researcher-data_"))
            .collect();
        assert_eq!(snapshots.len(), 1);
    }
}
