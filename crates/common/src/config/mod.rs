//! Configuration management for the Lineage pipeline
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Data file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Reconciliation behavior
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Directory holding every persisted artifact
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory of per-record JSON shards
    #[serde(default = "default_shard_dir")]
    pub shard_dir: PathBuf,

    /// Only files with this extension are treated as shards
    #[serde(default = "default_shard_extension")]
    pub shard_extension: String,

    /// Merge shards in file-name order instead of directory order
    #[serde(default = "default_true")]
    pub sort_shards: bool,

    /// Merged collection, relative to `data_dir`
    #[serde(default = "default_merged_file")]
    pub merged_file: String,

    /// Canonical processed collection, relative to `data_dir`
    #[serde(default = "default_processed_file")]
    pub processed_file: String,

    /// Relation graph, relative to `data_dir`
    #[serde(default = "default_relation_file")]
    pub relation_file: String,

    /// Export of synthesized placeholder names, relative to `data_dir`
    #[serde(default = "default_new_names_file")]
    pub new_names_file: String,

    /// Also write a `researcher-data_YYYY-MM-DD.json` snapshot
    #[serde(default)]
    pub snapshot_dated: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Award date given to synthesized advisor records
    #[serde(default = "default_placeholder_award_date")]
    pub placeholder_award_date: String,

    /// How a name carried by several records is resolved
    #[serde(default)]
    pub duplicate_policy: DuplicateNamePolicy,
}

/// Resolution of a name reference that matches more than one record
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateNamePolicy {
    /// Keep every matching id
    #[default]
    All,
    /// Keep the lowest matching id
    First,
    /// Fail the run
    Reject,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,

    /// Service name attached to log lines
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_data_dir() -> PathBuf { PathBuf::from("./data") }
fn default_shard_dir() -> PathBuf { PathBuf::from("./data/json") }
fn default_shard_extension() -> String { "json".to_string() }
fn default_true() -> bool { true }
fn default_merged_file() -> String { "researcher-data.json".to_string() }
fn default_processed_file() -> String { "processed-researcher-data.json".to_string() }
fn default_relation_file() -> String { "relation-data.json".to_string() }
fn default_new_names_file() -> String { "new-researchers.csv".to_string() }
fn default_placeholder_award_date() -> String { crate::PLACEHOLDER_AWARD_DATE.to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_service_name() -> String { "lineage".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__DATA__SHARD_DIR=/srv/shards
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }
}

impl DataConfig {
    pub fn merged_path(&self) -> PathBuf {
        self.data_dir.join(&self.merged_file)
    }

    pub fn processed_path(&self) -> PathBuf {
        self.data_dir.join(&self.processed_file)
    }

    pub fn relation_path(&self) -> PathBuf {
        self.data_dir.join(&self.relation_file)
    }

    pub fn new_names_path(&self) -> PathBuf {
        self.data_dir.join(&self.new_names_file)
    }

    /// Dated snapshot path for the given day, e.g. `researcher-data_2025-11-23.json`
    pub fn snapshot_path(&self, day: chrono::NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("researcher-data_{}.json", day.format("%Y-%m-%d")))
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            shard_dir: default_shard_dir(),
            shard_extension: default_shard_extension(),
            sort_shards: default_true(),
            merged_file: default_merged_file(),
            processed_file: default_processed_file(),
            relation_file: default_relation_file(),
            new_names_file: default_new_names_file(),
            snapshot_dated: false,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            placeholder_award_date: default_placeholder_award_date(),
            duplicate_policy: DuplicateNamePolicy::default(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
            service_name: default_service_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            pipeline: PipelineConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
