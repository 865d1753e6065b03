//! Measurement rows of an inspection report.
//!
//! A [`Measurement`] is one line of the report's specification/result grid:
//! the characteristic's specification (numeric bounds or attribute criteria)
//! and the ordered results captured for every sampled part.
//!
//! The serde representation uses camelCase keys and also accepts the
//! snake_case column names used by the storage layer.
//!
//! # Examples
//!
//! ```
//! use u_inspection::measurement::{DataType, Measurement};
//!
//! let json = r#"{
//!     "dataType": "Variable",
//!     "minValue": 9.9,
//!     "nominalValue": "10.0",
//!     "maxValue": 10.1,
//!     "results": ["10.02", 9.97, null]
//! }"#;
//! let m: Measurement = serde_json::from_str(json).unwrap();
//! assert_eq!(m.data_type, DataType::Variable);
//! assert_eq!(m.nominal_value, Some(10.0));
//! assert_eq!(m.numeric_results(), vec![10.02, 9.97]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InspectionError;
use crate::sample::{numeric_sample, RawValue};

/// How a measurement row is judged.
///
/// Deserializes from a label accepted by [`FromStr`]; a `null` or blank
/// label is a Variable row, as unset storage columns are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DataType {
    /// Numeric result compared against `[min, max]`.
    #[default]
    Variable,
    /// Categorical result compared against ok/nok criteria.
    Attribute,
    /// Informational only; never judged.
    Reference,
}

impl DataType {
    /// Returns `true` if rows of this type take part in conformity counts.
    pub fn is_judged(self) -> bool {
        !matches!(self, DataType::Reference)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataType::Variable => "Variable",
            DataType::Attribute => "Attribute",
            DataType::Reference => "Reference",
        })
    }
}

impl FromStr for DataType {
    type Err = InspectionError;

    /// Accepts the English and Spanish labels used on capture forms,
    /// case-insensitively (`Variable`, `Atributo`, `Referencia`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_uppercase();
        match label.as_str() {
            "VARIABLE" | "VAR" => Ok(DataType::Variable),
            "REFERENCE" | "REFERENCIA" | "REF" => Ok(DataType::Reference),
            _ if label.starts_with("ATR") || label.starts_with("ATT") => Ok(DataType::Attribute),
            _ => Err(InspectionError::UnknownDataType(s.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(label) if !label.trim().is_empty() => {
                label.parse().map_err(serde::de::Error::custom)
            }
            _ => Ok(DataType::default()),
        }
    }
}

/// One row of an inspection report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Storage identifier, if persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Drawing dimension number ("balloon").
    #[serde(default, alias = "cota_number", skip_serializing_if = "Option::is_none")]
    pub balloon: Option<String>,
    /// Free-text description of the characteristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristic: Option<String>,
    #[serde(default, alias = "data_type")]
    pub data_type: DataType,
    /// Lower specification limit.
    #[serde(default, alias = "min_value", deserialize_with = "deserialize_bound")]
    pub min_value: Option<f64>,
    /// Target value.
    #[serde(default, alias = "nominal_value", deserialize_with = "deserialize_bound")]
    pub nominal_value: Option<f64>,
    /// Upper specification limit.
    #[serde(default, alias = "max_value", deserialize_with = "deserialize_bound")]
    pub max_value: Option<f64>,
    #[serde(default, alias = "criteria_ok")]
    pub criteria_ok: Option<String>,
    #[serde(default, alias = "criteria_nok")]
    pub criteria_nok: Option<String>,
    /// Captured results; position is the sample number.
    #[serde(default)]
    pub results: Vec<RawValue>,
}

impl Measurement {
    /// Creates an empty row of the given type.
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            ..Self::default()
        }
    }

    /// Creates a Variable row with the given bounds.
    pub fn variable(min: Option<f64>, nominal: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min_value: min,
            nominal_value: nominal,
            max_value: max,
            ..Self::new(DataType::Variable)
        }
    }

    /// Creates an Attribute row with the given criteria.
    pub fn attribute(ok: Option<&str>, nok: Option<&str>) -> Self {
        Self {
            criteria_ok: ok.map(str::to_owned),
            criteria_nok: nok.map(str::to_owned),
            ..Self::new(DataType::Attribute)
        }
    }

    /// Replaces the captured results.
    pub fn with_results<I, V>(mut self, results: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RawValue>,
    {
        self.results = results.into_iter().map(Into::into).collect();
        self
    }

    /// The numeric sample of this row's results.
    pub fn numeric_results(&self) -> Vec<f64> {
        numeric_sample(&self.results)
    }
}

/// Normalizes an attribute word for comparison: trimmed and uppercased.
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Normalized criterion, or `None` when unset or blank.
pub(crate) fn normalized_criterion(c: Option<&str>) -> Option<String> {
    c.map(normalize_label).filter(|c| !c.is_empty())
}

/// A bound may arrive as a number, a numeric string, `""` or `null`.
fn deserialize_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawValue::deserialize(deserializer)?;
    Ok(crate::sample::parse_numeric(&raw))
}
