//! Lineage Ingestion
//!
//! Builds the canonical researcher collection:
//! 1. Merges JSON shards into one collection
//! 2. Normalizes scalar names into alias lists
//! 3. Synthesizes records for advisors that only appear as references
//! 4. Sorts by award date and name, then assigns ids `1..N`

pub mod export;
pub mod materialize;
pub mod normalize;
pub mod ordering;
pub mod processor;
pub mod shards;

pub use materialize::{materialize_advisors, Materialized};
pub use normalize::normalize_names;
pub use ordering::{assign_ids, order_and_number, sort_records};
pub use processor::{preprocess_records, IngestionProcessor, Preprocessed};
pub use shards::{merge_directory, MergedShards};
