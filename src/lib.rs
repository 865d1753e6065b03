//! # u-inspection
//!
//! Statistics for dimensional and attribute inspection reports: descriptive
//! statistics, pass/fail conformity, process capability and histogram data.
//!
//! The engine is a set of pure functions over in-memory snapshots of a
//! report's measurement rows. Raw result cells may be numbers, numeric text
//! or blanks; every computation projects them onto a numeric sample first
//! and rounds its outputs to four decimals at computation time, so a report
//! reproduces exactly when recomputed.
//!
//! ## Modules
//!
//! - [`sample`] — Raw cells, numeric coercion, rounding
//! - [`measurement`] — Report rows (Variable, Attribute, Reference)
//! - [`descriptive`] — Count, mean, median, mode, standard deviation, range
//! - [`conformity`] — Per-cell pass/fail and report summary
//! - [`capability`] — Cp, Cpk, Pp, Ppk, Cpm, K and spec-derived limits
//! - [`histogram`] — Spec-aware histogram bins with a normal overlay
//! - [`report`] — Whole-report analysis bundle
//! - [`config`] — Analysis settings (TOML)
//!
//! ## Entry points
//!
//! ```
//! use u_inspection::{compute_capability, compute_descriptive_stats, compute_histogram, RawValue};
//!
//! let raw: Vec<RawValue> = ["9", "10", "11", "", "9", "10", "11"]
//!     .into_iter()
//!     .map(RawValue::from)
//!     .collect();
//!
//! let stats = compute_descriptive_stats(&raw);
//! assert_eq!(stats.count, 6);
//!
//! let cap = compute_capability(&raw, Some(8.0), Some(12.0), Some(10.0), 1).unwrap();
//! assert_eq!(cap.k, 0.0);
//!
//! let hist = compute_histogram(&raw, Some(8.0), Some(12.0), 12);
//! assert_eq!(hist.bins.len(), 12);
//! ```

pub mod capability;
pub mod config;
pub mod conformity;
pub mod descriptive;
pub mod error;
pub mod histogram;
pub mod measurement;
pub mod report;
pub mod sample;

pub use capability::{compute_capability, CapabilityResult};
pub use config::AnalysisConfig;
pub use conformity::{compute_conformity_summary, ConformitySummary, Verdict};
pub use descriptive::{compute_descriptive_stats, DescriptiveStats};
pub use error::InspectionError;
pub use histogram::{compute_histogram, HistogramBin, HistogramResult};
pub use measurement::{DataType, Measurement};
pub use report::{analyze_report, ReportAnalysis};
pub use sample::RawValue;
