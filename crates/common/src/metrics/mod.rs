//! Pipeline metrics
//!
//! Counters and gauges for each stage, named under a common prefix. Nothing
//! is exported unless the host process installs a recorder.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Lineage metrics
pub const METRICS_PREFIX: &str = "lineage";

/// Register all metric descriptions
pub fn register_metrics() {
    describe_histogram!(
        format!("{}_stage_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Wall time of one pipeline stage"
    );

    // Ingestion metrics
    describe_counter!(
        format!("{}_shards_read_total", METRICS_PREFIX),
        Unit::Count,
        "Shard files merged"
    );

    describe_counter!(
        format!("{}_records_merged_total", METRICS_PREFIX),
        Unit::Count,
        "Records read from shards"
    );

    describe_counter!(
        format!("{}_names_normalized_total", METRICS_PREFIX),
        Unit::Count,
        "Scalar names rewritten into lists"
    );

    describe_counter!(
        format!("{}_placeholders_created_total", METRICS_PREFIX),
        Unit::Count,
        "Advisor-only records synthesized"
    );

    // Relation metrics
    describe_gauge!(
        format!("{}_relation_entries", METRICS_PREFIX),
        Unit::Count,
        "Relation entries in the last resolved graph"
    );

    describe_gauge!(
        format!("{}_relation_edges", METRICS_PREFIX),
        Unit::Count,
        "Advisor edges in the last resolved graph"
    );

    describe_counter!(
        format!("{}_reference_warnings_total", METRICS_PREFIX),
        Unit::Count,
        "Advisor references that were unresolved or ambiguous"
    );

    tracing::debug!("Metrics registered");
}

/// Times one stage and records it on `finish`
pub struct StageMetrics {
    start: Instant,
    stage: &'static str,
}

impl StageMetrics {
    /// Start timing a stage
    pub fn start(stage: &'static str) -> Self {
        Self {
            start: Instant::now(),
            stage,
        }
    }

    /// Record stage completion, returning the elapsed seconds
    pub fn finish(self) -> f64 {
        let duration = self.start.elapsed().as_secs_f64();

        histogram!(
            format!("{}_stage_duration_seconds", METRICS_PREFIX),
            "stage" => self.stage
        )
        .record(duration);

        duration
    }
}

/// Helper to record shard merge metrics
pub fn record_merge(shards: usize, records: usize) {
    counter!(format!("{}_shards_read_total", METRICS_PREFIX)).increment(shards as u64);
    counter!(format!("{}_records_merged_total", METRICS_PREFIX)).increment(records as u64);
}

/// Helper to record preprocessing metrics
pub fn record_preprocess(normalized: usize, placeholders: usize) {
    counter!(format!("{}_names_normalized_total", METRICS_PREFIX)).increment(normalized as u64);
    counter!(format!("{}_placeholders_created_total", METRICS_PREFIX))
        .increment(placeholders as u64);
}

/// Helper to record relation graph metrics
pub fn record_relations(entries: usize, edges: usize) {
    gauge!(format!("{}_relation_entries", METRICS_PREFIX)).set(entries as f64);
    gauge!(format!("{}_relation_edges", METRICS_PREFIX)).set(edges as f64);
}

/// Helper to record a reference warning by kind
pub fn record_reference_warning(kind: &'static str) {
    counter!(
        format!("{}_reference_warnings_total", METRICS_PREFIX),
        "kind" => kind
    )
    .increment(1);
}
