//! Descriptive statistics of a measurement's numeric sample.
//!
//! Figures are rounded to four decimals when they are computed, not when
//! they are displayed: downstream computations (capability indices,
//! histogram curves) consume the rounded mean and standard deviation, which
//! keeps every report reproducible to the last printed digit.
//!
//! # Examples
//!
//! ```
//! use u_inspection::descriptive::compute_descriptive_stats;
//! use u_inspection::sample::RawValue;
//!
//! let raw: Vec<RawValue> = ["10.1", "10.3", "", "10.2", "10.3"]
//!     .into_iter()
//!     .map(RawValue::from)
//!     .collect();
//! let stats = compute_descriptive_stats(&raw);
//! assert_eq!(stats.count, 4);
//! assert_eq!(stats.mean, 10.225);
//! assert_eq!(stats.median, 10.25);
//! assert_eq!(stats.mode, 10.3);
//! assert_eq!(stats.range, 0.2);
//! ```

use serde::Serialize;

use crate::sample::{numeric_sample, round4, RawValue};

/// Summary of a numeric sample.
///
/// An empty sample yields all fields zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    /// Number of numeric entries.
    pub count: usize,
    /// Arithmetic mean, rounded.
    pub mean: f64,
    /// Median. Rounded for even counts; the central value as stored for odd counts.
    pub median: f64,
    /// Most frequent value; ties go to the smallest value.
    pub mode: f64,
    /// Sample standard deviation (n - 1), rounded. Zero for `count <= 1`.
    pub std_dev: f64,
    /// Smallest value, as stored.
    pub min: f64,
    /// Largest value, as stored.
    pub max: f64,
    /// `max - min`, rounded.
    pub range: f64,
}

impl DescriptiveStats {
    /// Computes the summary of an already numeric sample.
    ///
    /// Values are expected to be finite (see [`numeric_sample`]).
    pub fn from_sample(data: &[f64]) -> Self {
        let n = data.len();
        if n == 0 {
            return Self::default();
        }

        let mean = round4(data.iter().sum::<f64>() / n as f64);

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mid = n / 2;
        let median = if n % 2 == 1 {
            sorted[mid]
        } else {
            round4((sorted[mid - 1] + sorted[mid]) / 2.0)
        };

        let min = sorted[0];
        let max = sorted[n - 1];

        // The deviation is taken around the rounded mean.
        let std_dev = if n > 1 {
            let ss: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
            round4((ss / (n - 1) as f64).sqrt())
        } else {
            0.0
        };

        Self {
            count: n,
            mean,
            median,
            mode: mode_of_sorted(&sorted),
            std_dev,
            min,
            max,
            range: round4(max - min),
        }
    }

    /// Returns `true` if the sample had no numeric entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Computes descriptive statistics over raw result entries.
///
/// Unparseable entries are dropped before computing (see
/// [`numeric_sample`]).
pub fn compute_descriptive_stats(raw: &[RawValue]) -> DescriptiveStats {
    DescriptiveStats::from_sample(&numeric_sample(raw))
}

/// Scans ascending runs; the first run to exceed the best count wins.
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_count = 0;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let mut j = i;
        while j < sorted.len() && sorted[j] == value {
            j += 1;
        }
        if j - i > best_count {
            best = value;
            best_count = j - i;
        }
        i = j;
    }
    best
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn range_is_rounded_max_minus_min(
            data in proptest::collection::vec(-1e4_f64..1e4, 1..=60)
        ) {
            let s = DescriptiveStats::from_sample(&data);
            prop_assert_eq!(s.range, round4(s.max - s.min));
            prop_assert!(s.min <= s.max);
        }

        #[test]
        fn mean_and_median_within_bounds(
            data in proptest::collection::vec(-1e4_f64..1e4, 1..=60)
        ) {
            let s = DescriptiveStats::from_sample(&data);
            prop_assert!(s.mean >= round4(s.min) - 1e-4 && s.mean <= round4(s.max) + 1e-4);
            prop_assert!(s.median >= s.min - 1e-4 && s.median <= s.max + 1e-4);
            prop_assert!(data.contains(&s.mode));
        }

        #[test]
        fn std_dev_non_negative_and_finite(
            data in proptest::collection::vec(-1e4_f64..1e4, 0..=60)
        ) {
            let s = DescriptiveStats::from_sample(&data);
            prop_assert!(s.std_dev >= 0.0 && s.std_dev.is_finite());
        }

        #[test]
        fn recomputation_is_identical(
            data in proptest::collection::vec(-1e4_f64..1e4, 0..=60)
        ) {
            prop_assert_eq!(DescriptiveStats::from_sample(&data), DescriptiveStats::from_sample(&data));
        }
    }
}
