//! Lineage Relations batch run
//!
//! Reads the canonical processed collection and writes the relation graph:
//! one entry per researcher with advisor and advisee ids.

use anyhow::Context;
use lineage_common::{config::AppConfig, metrics, telemetry, VERSION};
use lineage_relations::{RelationProcessor, RelationSummary};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    telemetry::init_tracing(&config.observability);
    metrics::register_metrics();

    info!("Starting Lineage Relations v{}", VERSION);

    let processor = RelationProcessor::new(config);
    let resolution = processor.run().map_err(|e| {
        tracing::error!(
            error = %e,
            code = e.code().as_code(),
            data_error = e.is_data_error(),
            "Relation resolution failed"
        );
        e
    })?;

    let summary = RelationSummary::of(&resolution);
    info!(
        records = summary.records,
        edges = summary.edges,
        warnings = summary.warnings,
        "Relations complete"
    );
    Ok(())
}
