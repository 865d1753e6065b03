//! Error type for the fallible boundary of the crate.
//!
//! The statistics themselves never fail on data. Errors only come from
//! interpreting labels and loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding inputs or configuration.
#[derive(Debug, Error)]
pub enum InspectionError {
    /// A measurement data-type label that is not Variable, Attribute or Reference.
    #[error("unknown measurement data type: {0:?}")]
    UnknownDataType(String),

    /// A configuration value outside its allowed range.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`AnalysisConfig`](crate::config::AnalysisConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
