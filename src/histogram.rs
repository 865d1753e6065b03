//! Histogram and fitted normal curve for capability charts.
//!
//! The plotted domain always contains both specification limits when they
//! are given, so the chart shows where the sample sits inside the
//! tolerance even when every part is well centered. The domain is padded by
//! 10 % of its width on each side and split into equal-width bins.
//!
//! # Examples
//!
//! ```
//! use u_inspection::histogram::compute_histogram;
//! use u_inspection::sample::RawValue;
//!
//! let raw: Vec<RawValue> = [9.8, 9.9, 10.0, 10.0, 10.1, 10.2]
//!     .into_iter()
//!     .map(RawValue::from)
//!     .collect();
//! let h = compute_histogram(&raw, Some(9.0), Some(11.0), 12);
//! assert_eq!(h.bins.len(), 12);
//! assert_eq!(h.normal_curve.len(), 12);
//! assert_eq!(h.bins.iter().map(|b| b.count).sum::<usize>(), 6);
//! assert!((h.plot_min - 8.8).abs() < 1e-9);
//! assert!((h.plot_max - 11.2).abs() < 1e-9);
//! ```

use serde::Serialize;
use tracing::debug;
use u_numflow::special;

use crate::descriptive::DescriptiveStats;
use crate::sample::{numeric_sample, to_fixed, RawValue};

/// Number of bins used when none is configured.
pub const DEFAULT_HISTOGRAM_BINS: usize = 8;

/// Padding added on each side of the domain, as a fraction of its width.
const PADDING_FRACTION: f64 = 0.1;

/// Extra room on the right edge of the last bin so `plot_max` is counted.
const LAST_BIN_EPSILON: f64 = 1e-5;

/// One histogram bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    /// `"start-end"` with three decimals.
    pub label: String,
    pub count: usize,
    /// Bin midpoint, where the normal curve is evaluated.
    pub mid: f64,
    pub start: f64,
    pub end: f64,
}

/// Histogram bars with a parallel expected-frequency curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramResult {
    pub bins: Vec<HistogramBin>,
    /// Expected count per bin under a normal fit; same length as `bins`.
    pub normal_curve: Vec<f64>,
    pub plot_min: f64,
    pub plot_max: f64,
    pub bin_size: f64,
}

impl HistogramResult {
    /// Returns `true` when there was nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Builds the histogram of raw result entries.
///
/// Unparseable entries are dropped. An empty sample or `num_bins == 0`
/// yields an empty result.
pub fn compute_histogram(
    raw: &[RawValue],
    min: Option<f64>,
    max: Option<f64>,
    num_bins: usize,
) -> HistogramResult {
    histogram_from_sample(&numeric_sample(raw), min, max, num_bins)
}

/// Builds the histogram of a numeric sample against optional limits.
pub fn histogram_from_sample(
    data: &[f64],
    lsl: Option<f64>,
    usl: Option<f64>,
    num_bins: usize,
) -> HistogramResult {
    if data.is_empty() || num_bins == 0 {
        return HistogramResult::default();
    }

    let stats = DescriptiveStats::from_sample(data);
    let n = data.len() as f64;

    let lsl = lsl.filter(|v| v.is_finite());
    let usl = usl.filter(|v| v.is_finite());
    let (range_start, range_end) = match (lsl, usl) {
        (Some(l), Some(u)) => (l.min(stats.min), u.max(stats.max)),
        _ => (stats.min, stats.max),
    };
    let padding = (range_end - range_start) * PADDING_FRACTION;
    let plot_min = range_start - padding;
    let plot_max = range_end + padding;
    let bin_size = (plot_max - plot_min) / num_bins as f64;

    if stats.std_dev == 0.0 {
        debug!(n = data.len(), "zero standard deviation, normal curve is flat");
    }

    let mut bins = Vec::with_capacity(num_bins);
    let mut normal_curve = Vec::with_capacity(num_bins);

    for i in 0..num_bins {
        let start = plot_min + i as f64 * bin_size;
        let end = plot_min + (i + 1) as f64 * bin_size;
        let mid = (start + end) / 2.0;

        let upper = if i == num_bins - 1 {
            end + LAST_BIN_EPSILON
        } else {
            end
        };
        let count = data.iter().filter(|&&x| x >= start && x < upper).count();

        bins.push(HistogramBin {
            label: format!("{}-{}", to_fixed(start, 3), to_fixed(end, 3)),
            count,
            mid,
            start,
            end,
        });
        normal_curve.push(n * bin_size * normal_pdf(mid, stats.mean, stats.std_dev));
    }

    HistogramResult {
        bins,
        normal_curve,
        plot_min,
        plot_max,
        bin_size,
    }
}

/// Normal density; `0.0` for a degenerate (zero or invalid) sigma.
fn normal_pdf(x: f64, mean: f64, sigma: f64) -> f64 {
    if sigma.is_nan() || sigma <= 0.0 {
        return 0.0;
    }
    special::standard_normal_pdf((x - mean) / sigma) / sigma
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn counts_sum_to_n(
            data in proptest::collection::vec(-1e3_f64..1e3, 1..=100),
            bins in 1_usize..=20,
        ) {
            let h = histogram_from_sample(&data, None, None, bins);
            let total: usize = h.bins.iter().map(|b| b.count).sum();
            prop_assert_eq!(total, data.len());
        }

        #[test]
        fn counts_sum_to_n_with_limits(
            data in proptest::collection::vec(-10.0_f64..10.0, 1..=100),
            lsl in -20.0_f64..0.0,
            usl in 0.0_f64..20.0,
        ) {
            let h = histogram_from_sample(&data, Some(lsl), Some(usl), 12);
            let total: usize = h.bins.iter().map(|b| b.count).sum();
            prop_assert_eq!(total, data.len());
        }

        #[test]
        fn curve_is_finite_and_non_negative(
            data in proptest::collection::vec(-1e3_f64..1e3, 1..=60),
        ) {
            let h = histogram_from_sample(&data, None, None, 8);
            prop_assert_eq!(h.normal_curve.len(), 8);
            for v in &h.normal_curve {
                prop_assert!(v.is_finite() && *v >= 0.0, "bad ordinate {v}");
            }
        }

        #[test]
        fn recomputation_is_identical(
            data in proptest::collection::vec(-1e3_f64..1e3, 0..=60),
        ) {
            prop_assert_eq!(
                histogram_from_sample(&data, Some(-5.0), Some(5.0), 12),
                histogram_from_sample(&data, Some(-5.0), Some(5.0), 12)
            );
        }
    }
}
