//! Analysis configuration.
//!
//! Settings can be built in code or read from a TOML file:
//!
//! ```toml
//! subgroup-size = 5
//! histogram-bins = 12
//! attribute-ok-label = "PASA"
//! attribute-nok-label = "NO PASA"
//! ```
//!
//! Every key is optional and falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capability::DEFAULT_SUBGROUP_SIZE;
use crate::error::InspectionError;
use crate::histogram::DEFAULT_HISTOGRAM_BINS;

/// Parameters for whole-report analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnalysisConfig {
    /// Rational subgroup size for the within sigma (1 = individuals).
    pub subgroup_size: usize,
    /// Number of histogram bins.
    pub histogram_bins: usize,
    /// Ok word assumed for Attribute rows without `criteria_ok` when tallying.
    pub attribute_ok_label: String,
    /// Nok word assumed for Attribute rows without `criteria_nok` when tallying.
    pub attribute_nok_label: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            subgroup_size: DEFAULT_SUBGROUP_SIZE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            attribute_ok_label: "OK".to_owned(),
            attribute_nok_label: "NOT OK".to_owned(),
        }
    }
}

impl AnalysisConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_inspection::config::AnalysisConfig;
    ///
    /// let cfg = AnalysisConfig::from_toml_str("histogram-bins = 12").unwrap();
    /// assert_eq!(cfg.histogram_bins, 12);
    /// assert_eq!(cfg.subgroup_size, 1);
    ///
    /// assert!(AnalysisConfig::from_toml_str("histogram-bins = 0").is_err());
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, InspectionError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InspectionError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| InspectionError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), InspectionError> {
        if self.subgroup_size == 0 {
            return Err(InspectionError::InvalidConfig {
                field: "subgroup-size",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.histogram_bins == 0 {
            return Err(InspectionError::InvalidConfig {
                field: "histogram-bins",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}
