//! Whole-report analysis.
//!
//! Bundles the per-row figures a report renderer needs: descriptive
//! statistics, capability and histogram for Variable rows, ok/nok tallies
//! for Attribute rows, and the conformity summary over the whole report.
//! Rows are analysed independently of each other.
//!
//! # Examples
//!
//! ```
//! use u_inspection::config::AnalysisConfig;
//! use u_inspection::measurement::Measurement;
//! use u_inspection::report::analyze_report;
//!
//! let rows = vec![
//!     Measurement::variable(Some(8.0), Some(10.0), Some(12.0))
//!         .with_results(["9", "10", "11", "9", "10", "11"]),
//!     Measurement::attribute(None, None).with_results(["ok", "not ok", "OK"]),
//! ];
//! let report = analyze_report(&rows, &AnalysisConfig::default());
//!
//! assert_eq!(report.conformity.total, 9);
//! assert_eq!(report.rows[0].capability.unwrap().mean, 10.0);
//! let tally = report.rows[1].attribute.unwrap();
//! assert_eq!((tally.ok, tally.nok, tally.total), (2, 1, 3));
//! ```

use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::capability::{CapabilityResult, ProcessCapability};
use crate::config::AnalysisConfig;
use crate::conformity::{check_variable, compute_conformity_summary, ConformitySummary};
use crate::descriptive::DescriptiveStats;
use crate::histogram::{histogram_from_sample, HistogramResult};
use crate::measurement::{normalize_label, normalized_criterion, DataType, Measurement};
use crate::sample::parse_numeric;

/// Ok/nok counts of an Attribute row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttributeTally {
    /// Cells equal to the ok word.
    pub ok: usize,
    /// Cells equal to the nok word.
    pub nok: usize,
    /// All cells, including blanks and unmatched words.
    pub total: usize,
}

/// Figures for one report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementAnalysis {
    /// Position of the row in the report.
    pub index: usize,
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balloon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DescriptiveStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<CapabilityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<HistogramResult>,
    /// Percentage of cells inside the specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_spec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributeTally>,
}

/// Analysis of a whole report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportAnalysis {
    pub conformity: ConformitySummary,
    pub rows: Vec<MeasurementAnalysis>,
}

/// Analyses every row of a report.
pub fn analyze_report(measurements: &[Measurement], config: &AnalysisConfig) -> ReportAnalysis {
    let _span = debug_span!("analyze_report", rows = measurements.len()).entered();

    let rows: Vec<MeasurementAnalysis> = measurements
        .iter()
        .enumerate()
        .map(|(index, m)| analyze_measurement(index, m, config))
        .collect();
    let conformity = compute_conformity_summary(measurements);

    debug!(
        total = conformity.total,
        pass = conformity.pass,
        fail = conformity.fail,
        "report analysed"
    );
    ReportAnalysis { conformity, rows }
}

/// Analyses a single row according to its data type.
pub fn analyze_measurement(
    index: usize,
    measurement: &Measurement,
    config: &AnalysisConfig,
) -> MeasurementAnalysis {
    let mut analysis = MeasurementAnalysis {
        index,
        data_type: measurement.data_type,
        balloon: measurement.balloon.clone(),
        characteristic: measurement.characteristic.clone(),
        stats: None,
        capability: None,
        histogram: None,
        within_spec: None,
        attribute: None,
    };

    match measurement.data_type {
        DataType::Variable => {
            let data = measurement.numeric_results();
            if data.is_empty() && !measurement.results.is_empty() {
                warn!(
                    index,
                    cells = measurement.results.len(),
                    "variable row has no numeric results"
                );
            }
            analysis.stats = Some(DescriptiveStats::from_sample(&data));
            analysis.capability =
                ProcessCapability::new(measurement.max_value, measurement.min_value)
                    .with_nominal(measurement.nominal_value)
                    .with_subgroup_size(config.subgroup_size)
                    .compute(&data);
            analysis.histogram = Some(histogram_from_sample(
                &data,
                measurement.min_value,
                measurement.max_value,
                config.histogram_bins,
            ));
            analysis.within_spec = Some(within_spec_ratio(measurement));
        }
        DataType::Attribute => {
            analysis.attribute = Some(tally_attribute(
                measurement,
                &config.attribute_ok_label,
                &config.attribute_nok_label,
            ));
        }
        DataType::Reference => {}
    }
    analysis
}

/// Counts cells matching the ok and nok words of an Attribute row.
///
/// Criteria missing from the row fall back to `default_ok` / `default_nok`.
/// Comparison is trimmed and case-insensitive.
pub fn tally_attribute(
    measurement: &Measurement,
    default_ok: &str,
    default_nok: &str,
) -> AttributeTally {
    let ok = normalized_criterion(measurement.criteria_ok.as_deref())
        .unwrap_or_else(|| normalize_label(default_ok));
    let nok = normalized_criterion(measurement.criteria_nok.as_deref())
        .unwrap_or_else(|| normalize_label(default_nok));

    let mut tally = AttributeTally {
        total: measurement.results.len(),
        ..AttributeTally::default()
    };
    for value in &measurement.results {
        let current = normalize_label(&value.to_string());
        if current == ok {
            tally.ok += 1;
        } else if current == nok {
            tally.nok += 1;
        }
    }
    tally
}

/// Percentage of a row's cells that are numeric and inside its bounds.
///
/// Blank and non-numeric cells count against the ratio. Returns `0.0` for a
/// row without cells.
pub fn within_spec_ratio(measurement: &Measurement) -> f64 {
    let total = measurement.results.len();
    if total == 0 {
        return 0.0;
    }
    let inside = measurement
        .results
        .iter()
        .filter(|v| {
            parse_numeric(v).is_some()
                && check_variable(v, measurement.min_value, measurement.max_value).is_pass()
        })
        .count();
    inside as f64 * 100.0 / total as f64
}
