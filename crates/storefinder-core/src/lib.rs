//! Shared primitives for the storefinder workspace: coordinates, raw location
//! records, the locator's search options, and environment-driven config.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod options;
pub mod records;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::Coordinate;
pub use options::{EmptyResultPolicy, LocatorOptions, Variant, Viewport};
pub use records::{load_records, LocationRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read records file {path}: {source}")]
    RecordsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON records file: {0}")]
    RecordsJsonParse(#[source] serde_json::Error),

    #[error("failed to parse YAML records file: {0}")]
    RecordsYamlParse(#[source] serde_yaml::Error),
}
