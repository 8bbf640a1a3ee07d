//! Lineage Ingestion batch run
//!
//! 1. Merges the shard directory into the merged collection
//! 2. Builds and writes the canonical processed collection
//! 3. Exports the names of synthesized advisor records

use anyhow::Context;
use lineage_common::{config::AppConfig, metrics, telemetry, VERSION};
use lineage_ingestion::IngestionProcessor;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    telemetry::init_tracing(&config.observability);
    metrics::register_metrics();

    info!("Starting Lineage Ingestion v{}", VERSION);

    let processor = IngestionProcessor::new(config);
    let outcome = processor.run().map_err(|e| {
        tracing::error!(
            error = %e,
            code = e.code().as_code(),
            data_error = e.is_data_error(),
            "Ingestion failed"
        );
        e
    })?;

    info!(
        records = outcome.records.len(),
        placeholders = outcome.synthesized.len(),
        "Ingestion complete"
    );
    Ok(())
}
