//! Lineage Common Library
//!
//! Shared code for the Lineage batch stages including:
//! - Researcher and relation models
//! - Error types and handling
//! - Configuration management
//! - JSON artifact persistence
//! - Metrics and logging setup

pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use crate::config::{AppConfig, DuplicateNamePolicy};
pub use crate::errors::{PipelineError, Result};
pub use crate::models::{RelationEntry, Researcher};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Award date given to synthesized advisor records.
///
/// Placeholders sort before every record dated after it, not before all
/// records: a real record dated earlier (e.g. `1985-03`) still gets a lower id.
pub const PLACEHOLDER_AWARD_DATE: &str = "1990-01";
