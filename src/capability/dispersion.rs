//! Short-term (within-subgroup) dispersion estimates.
//!
//! Cp/Cpk use a short-term sigma estimated from ranges: the average range
//! of rational subgroups divided by the control-chart constant d2, or, for
//! individual observations, the average moving range divided by d2(2).
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use tracing::debug;
use u_numflow::stats;

/// d2 factors (mean of the range distribution), indexed by subgroup size
/// n=2..10. Index 0 corresponds to n=2.
///
/// sigma-hat = R-bar / d2.
const D2: [f64; 9] = [1.128, 1.693, 2.059, 2.326, 2.534, 2.704, 2.847, 2.970, 3.078];

/// Largest subgroup size with a tabulated d2 factor.
pub const MAX_SUBGROUP_SIZE: usize = 10;

/// d2 for a subgroup size in 2..=10.
///
/// # Examples
///
/// ```
/// use u_inspection::capability::d2;
///
/// assert_eq!(d2(2), Some(1.128));
/// assert_eq!(d2(5), Some(2.326));
/// assert_eq!(d2(1), None);
/// assert_eq!(d2(11), None);
/// ```
pub fn d2(subgroup_size: usize) -> Option<f64> {
    (2..=MAX_SUBGROUP_SIZE)
        .contains(&subgroup_size)
        .then(|| D2[subgroup_size - 2])
}

/// Average range over consecutive, non-overlapping subgroups.
///
/// A trailing chunk shorter than `subgroup_size` is discarded. Returns
/// `None` when no complete subgroup exists.
pub fn average_range(data: &[f64], subgroup_size: usize) -> Option<f64> {
    if subgroup_size == 0 {
        return None;
    }
    let ranges: Vec<f64> = data
        .chunks_exact(subgroup_size)
        .map(subgroup_range)
        .collect();
    stats::mean(&ranges)
}

/// Average absolute difference between consecutive observations.
///
/// Returns `None` for fewer than two observations.
pub fn average_moving_range(data: &[f64]) -> Option<f64> {
    let moving: Vec<f64> = data.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    stats::mean(&moving)
}

/// Estimates the within-subgroup standard deviation.
///
/// - `subgroup_size` in 2..=10: R-bar / d2(n), falling back to
///   `sigma_overall` when no complete subgroup exists.
/// - `subgroup_size == 1` with at least two values: MR-bar / d2(2).
/// - anything else: `sigma_overall`.
///
/// # Examples
///
/// ```
/// use u_inspection::capability::sigma_within;
///
/// // Two subgroups of 3, ranges 2 and 4: R-bar = 3, sigma = 3 / 1.693.
/// let data = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 5.0];
/// let s = sigma_within(&data, 3, 1.9);
/// assert!((s - 3.0 / 1.693).abs() < 1e-12);
/// ```
pub fn sigma_within(data: &[f64], subgroup_size: usize, sigma_overall: f64) -> f64 {
    if let Some(d2) = d2(subgroup_size) {
        return match average_range(data, subgroup_size) {
            Some(r_bar) => r_bar / d2,
            None => {
                debug!(
                    subgroup_size,
                    n = data.len(),
                    "no complete subgroup, using overall sigma as within sigma"
                );
                sigma_overall
            }
        };
    }
    if subgroup_size == 1 {
        if let Some(mr_bar) = average_moving_range(data) {
            return mr_bar / D2[0];
        }
    }
    sigma_overall
}

/// Range of one subgroup; `0.0` for an empty slice.
fn subgroup_range(subgroup: &[f64]) -> f64 {
    match (stats::max(subgroup), stats::min(subgroup)) {
        (Some(max), Some(min)) => max - min,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d2_table_matches_astm() {
        let expected = [
            (2, 1.128),
            (3, 1.693),
            (4, 2.059),
            (5, 2.326),
            (6, 2.534),
            (7, 2.704),
            (8, 2.847),
            (9, 2.970),
            (10, 3.078),
        ];
        for (n, v) in expected {
            assert_eq!(d2(n), Some(v), "d2({n})");
        }
        assert_eq!(d2(0), None);
    }

    #[test]
    fn average_range_discards_partial_chunk() {
        let data = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 100.0];
        assert_eq!(average_range(&data, 3), Some(3.0));
    }

    #[test]
    fn subgroup_range_is_max_minus_min() {
        assert_eq!(subgroup_range(&[3.0, -1.5, 2.0]), 4.5);
        assert_eq!(subgroup_range(&[7.0]), 0.0);
        assert_eq!(subgroup_range(&[]), 0.0);
    }

    #[test]
    fn average_range_none_without_complete_chunk() {
        assert_eq!(average_range(&[1.0, 2.0], 3), None);
        assert_eq!(average_range(&[1.0, 2.0], 0), None);
    }

    #[test]
    fn moving_range_follows_capture_order() {
        // |10-9| + |11-10| + |9-11| + |10-9| + |11-10| = 6, over 5 ranges.
        let data = [9.0, 10.0, 11.0, 9.0, 10.0, 11.0];
        let mr = average_moving_range(&data).unwrap();
        assert!((mr - 1.2).abs() < 1e-12);
        assert_eq!(average_moving_range(&[3.0]), None);
    }

    #[test]
    fn individuals_use_moving_range() {
        let data = [9.0, 10.0, 11.0, 9.0, 10.0, 11.0];
        let s = sigma_within(&data, 1, 0.8944);
        assert!((s - 1.2 / 1.128).abs() < 1e-12);
    }

    #[test]
    fn subgroup_without_complete_chunk_falls_back() {
        assert_eq!(sigma_within(&[1.0, 2.0, 3.0], 5, 0.75), 0.75);
    }

    #[test]
    fn untabulated_sizes_fall_back() {
        let data = [1.0, 5.0, 2.0, 8.0];
        assert_eq!(sigma_within(&data, 0, 0.5), 0.5);
        assert_eq!(sigma_within(&data, 11, 0.5), 0.5);
        assert_eq!(sigma_within(&[4.0], 1, 0.0), 0.0);
    }
}
