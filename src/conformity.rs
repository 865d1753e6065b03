//! Pass/fail classification of result cells.
//!
//! Each captured cell of a Variable or Attribute row gets one [`Verdict`].
//! Reference rows are informational and never judged.
//!
//! # Policy for incomplete cells
//!
//! - A Variable cell that does not parse as a number passes: an empty cell
//!   is a sample not yet measured, not a rejected part.
//! - An Attribute cell that matches neither criterion fails only when an ok
//!   criterion is defined; without one, anything that is not the nok word
//!   passes. A blank Attribute cell never fails on the ok criterion.
//!
//! # Examples
//!
//! ```
//! use u_inspection::conformity::compute_conformity_summary;
//! use u_inspection::measurement::Measurement;
//!
//! let rows = vec![
//!     Measurement::variable(Some(10.0), None, Some(20.0)).with_results(["15", "25", ""]),
//!     Measurement::attribute(Some("OK"), Some("NOK")).with_results(["ok", "nok"]),
//! ];
//! let summary = compute_conformity_summary(&rows);
//! assert_eq!((summary.total, summary.pass, summary.fail), (5, 3, 2));
//! assert_eq!(summary.pass_rate(), Some(60.0));
//! ```

use serde::Serialize;

use crate::measurement::{normalize_label, normalized_criterion, DataType, Measurement};
use crate::sample::{parse_numeric, RawValue};

/// Outcome for a single result cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Inside the bounds, or matching the ok criterion.
    Pass,
    /// Outside the bounds, or matching the nok criterion.
    Fail,
}

impl Verdict {
    fn from_pass(pass: bool) -> Self {
        if pass {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Returns `true` for [`Verdict::Pass`].
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

/// Pass/fail counts over every judged cell of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConformitySummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
}

impl ConformitySummary {
    /// Percentage of passing cells, or `None` when nothing was judged.
    pub fn pass_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.pass as f64 * 100.0 / self.total as f64)
    }

    fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Pass => self.pass += 1,
            Verdict::Fail => self.fail += 1,
        }
    }
}

/// Judges one cell against its row's specification.
///
/// Returns `None` for Reference rows.
pub fn classify(value: &RawValue, measurement: &Measurement) -> Option<Verdict> {
    match measurement.data_type {
        DataType::Variable => Some(check_variable(
            value,
            measurement.min_value,
            measurement.max_value,
        )),
        DataType::Attribute => Some(check_attribute(
            value,
            measurement.criteria_ok.as_deref(),
            measurement.criteria_nok.as_deref(),
        )),
        DataType::Reference => None,
    }
}

/// Numeric check against independently optional bounds.
///
/// Unparseable values pass.
pub fn check_variable(value: &RawValue, min: Option<f64>, max: Option<f64>) -> Verdict {
    let Some(x) = parse_numeric(value) else {
        return Verdict::Pass;
    };
    let below = min.is_some_and(|lo| x < lo);
    let above = max.is_some_and(|hi| x > hi);
    Verdict::from_pass(!below && !above)
}

/// Categorical check against ok/nok words (trimmed, case-insensitive).
pub fn check_attribute(value: &RawValue, ok: Option<&str>, nok: Option<&str>) -> Verdict {
    let current = normalize_label(&value.to_string());

    if normalized_criterion(nok).is_some_and(|nok| current == nok) {
        return Verdict::Fail;
    }
    if let Some(ok) = normalized_criterion(ok) {
        if !current.is_empty() && current != ok {
            return Verdict::Fail;
        }
    }
    Verdict::Pass
}

/// Counts one verdict per result cell across all judged rows.
///
/// Cells beyond the report's nominal sample quantity are counted too.
pub fn compute_conformity_summary(measurements: &[Measurement]) -> ConformitySummary {
    let mut summary = ConformitySummary::default();
    for m in measurements {
        for value in &m.results {
            if let Some(verdict) = classify(value, m) {
                summary.record(verdict);
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(min: Option<f64>, max: Option<f64>) -> Measurement {
        Measurement::variable(min, None, max)
    }

    #[test]
    fn variable_within_and_outside_bounds() {
        let m = var(Some(10.0), Some(20.0));
        assert_eq!(classify(&"15".into(), &m), Some(Verdict::Pass));
        assert_eq!(classify(&"25".into(), &m), Some(Verdict::Fail));
        assert_eq!(classify(&"9.999".into(), &m), Some(Verdict::Fail));
        assert_eq!(classify(&10.0.into(), &m), Some(Verdict::Pass));
        assert_eq!(classify(&20.0.into(), &m), Some(Verdict::Pass));
    }

    #[test]
    fn variable_unparseable_passes() {
        let m = var(Some(10.0), Some(20.0));
        assert_eq!(classify(&"abc".into(), &m), Some(Verdict::Pass));
        assert_eq!(classify(&"".into(), &m), Some(Verdict::Pass));
        assert_eq!(classify(&RawValue::Empty, &m), Some(Verdict::Pass));
    }

    #[test]
    fn variable_bounds_are_independent() {
        let lower_only = var(Some(1.0), None);
        assert_eq!(classify(&1e9.into(), &lower_only), Some(Verdict::Pass));
        assert_eq!(classify(&0.5.into(), &lower_only), Some(Verdict::Fail));

        let upper_only = var(None, Some(1.0));
        assert_eq!(classify(&(-1e9).into(), &upper_only), Some(Verdict::Pass));
        assert_eq!(classify(&1.5.into(), &upper_only), Some(Verdict::Fail));

        let open = var(None, None);
        assert_eq!(classify(&123.0.into(), &open), Some(Verdict::Pass));
    }

    #[test]
    fn attribute_nok_fails_in_any_case() {
        let m = Measurement::attribute(Some("OK"), Some("NOK"));
        assert_eq!(classify(&"nok".into(), &m), Some(Verdict::Fail));
        assert_eq!(classify(&" NoK ".into(), &m), Some(Verdict::Fail));
        assert_eq!(classify(&"OK".into(), &m), Some(Verdict::Pass));
        assert_eq!(classify(&"ok ".into(), &m), Some(Verdict::Pass));
    }

    #[test]
    fn attribute_blank_is_not_a_mismatch() {
        let m = Measurement::attribute(Some("OK"), Some("NOK"));
        assert_eq!(classify(&"".into(), &m), Some(Verdict::Pass));
        assert_eq!(classify(&RawValue::Empty, &m), Some(Verdict::Pass));
    }

    #[test]
    fn attribute_mismatch_fails_only_with_ok_criterion() {
        let with_ok = Measurement::attribute(Some("OK"), Some("NOK"));
        assert_eq!(classify(&"maybe".into(), &with_ok), Some(Verdict::Fail));

        let nok_only = Measurement::attribute(None, Some("NOK"));
        assert_eq!(classify(&"maybe".into(), &nok_only), Some(Verdict::Pass));
        assert_eq!(classify(&"NOK".into(), &nok_only), Some(Verdict::Fail));

        let blank_ok = Measurement::attribute(Some("  "), None);
        assert_eq!(classify(&"anything".into(), &blank_ok), Some(Verdict::Pass));
    }

    #[test]
    fn attribute_numeric_cells_compare_as_text() {
        let m = Measurement::attribute(Some("1"), Some("0"));
        assert_eq!(classify(&1.0.into(), &m), Some(Verdict::Pass));
        assert_eq!(classify(&0.0.into(), &m), Some(Verdict::Fail));
    }

    #[test]
    fn reference_is_never_judged() {
        let m = Measurement {
            min_value: Some(0.0),
            max_value: Some(1.0),
            ..Measurement::new(DataType::Reference)
        };
        assert_eq!(classify(&"50".into(), &m), None);
    }

    #[test]
    fn summary_counts_every_cell_of_judged_rows() {
        let rows = vec![
            var(Some(0.0), Some(1.0)).with_results(["0.5", "2", "", "x"]),
            Measurement::attribute(Some("OK"), Some("NOK")).with_results(["OK", "NOK", "??"]),
            Measurement {
                results: vec!["999".into(); 5],
                ..Measurement::new(DataType::Reference)
            },
        ];
        let s = compute_conformity_summary(&rows);
        assert_eq!(s.total, 7);
        assert_eq!(s.pass, 4);
        assert_eq!(s.fail, 3);
        assert_eq!(s.total, s.pass + s.fail);
    }

    #[test]
    fn empty_report_has_no_pass_rate() {
        let s = compute_conformity_summary(&[]);
        assert_eq!(s, ConformitySummary::default());
        assert_eq!(s.pass_rate(), None);
    }

    #[test]
    fn verdict_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Verdict::Fail).unwrap(), "FAIL");
        assert!(Verdict::Pass.is_pass());
    }
}
