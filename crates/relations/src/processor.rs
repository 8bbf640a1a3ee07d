//! Relation processor
//!
//! Loads the canonical collection, resolves the relation graph and persists
//! it next to the collection.

use crate::relation::{resolve_relations, RelationSummary, Resolution};
use lineage_common::config::AppConfig;
use lineage_common::errors::Result;
use lineage_common::metrics::{self, StageMetrics};
use lineage_common::models::decode_records;
use lineage_common::store::{read_json, write_json};
use lineage_common::Researcher;
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Relation processor bound to one configuration
pub struct RelationProcessor {
    config: AppConfig,
}

impl RelationProcessor {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Read and decode the canonical processed collection
    pub fn load_collection(&self) -> Result<Vec<Researcher>> {
        let values: Vec<Value> = read_json(&self.config.data.processed_path())?;
        decode_records(values)
    }

    /// Resolve relations for `records` and persist them
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn process(&self, records: &[Researcher]) -> Result<Resolution> {
        let timer = StageMetrics::start("relations");

        let resolution = resolve_relations(records, self.config.pipeline.duplicate_policy)?;

        for (name, ids) in &resolution.duplicate_names {
            warn!(name = %name, ids = ?ids, "Name carried by several records");
        }

        for warning in &resolution.warnings {
            warn!(id = warning.id(), warning = ?warning, "Advisor reference not uniquely resolved");
            metrics::record_reference_warning(warning.kind());
        }

        let path = self.config.data.relation_path();
        write_json(&path, &resolution.entries)?;

        let summary = RelationSummary::of(&resolution);
        metrics::record_relations(summary.records, summary.edges);
        info!(
            path = %path.display(),
            records = summary.records,
            edges = summary.edges,
            roots = summary.roots,
            isolated = summary.isolated,
            max_degree = summary.max_degree,
            warnings = summary.warnings,
            elapsed_secs = timer.finish(),
            "Relation graph written"
        );

        Ok(resolution)
    }

    /// Load the collection, then resolve and persist its relations
    pub fn run(&self) -> Result<Resolution> {
        let records = self.load_collection()?;
        self.process(&records)
    }
}
