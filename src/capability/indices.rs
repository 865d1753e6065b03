//! Process capability indices (Cp, Cpk, Pp, Ppk, Cpm, K).
//!
//! Short-term indices (Cp family) use the within-subgroup sigma; long-term
//! indices (Pp family) use the overall sample standard deviation. All
//! figures are rounded to four decimals, and an index whose limits or
//! target are not specified is reported as `0.0`.
//!
//! The `ucl`/`lcl` pair reported alongside the indices is not a Shewhart
//! 3-sigma limit: it is the specification band narrowed by one sixth of the
//! tolerance on each side (`USL - T/6`, `LSL + T/6`).
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.
//! - Chan, Cheng & Spiring (1988), "A New Measure of Process Capability: Cpm",
//!   *Journal of Quality Technology* 20(3), pp. 162--175.

use serde::Serialize;

use super::dispersion::sigma_within;
use crate::descriptive::DescriptiveStats;
use crate::sample::{numeric_sample, round4, RawValue};

/// Subgroup size used when none is configured: individual observations.
pub const DEFAULT_SUBGROUP_SIZE: usize = 1;

/// Specification of a characteristic for capability analysis.
///
/// Limits and target are each optional; indices that need a missing value
/// come out as `0.0`.
///
/// # Examples
///
/// ```
/// use u_inspection::capability::ProcessCapability;
///
/// let spec = ProcessCapability::new(Some(12.0), Some(8.0)).with_nominal(10.0);
///
/// let data = [9.0, 10.0, 11.0, 9.0, 10.0, 11.0];
/// let result = spec.compute(&data).unwrap();
/// assert_eq!(result.mean, 10.0);
/// assert_eq!(result.k, 0.0);
/// assert_eq!(result.pp, 0.7454);
/// assert_eq!(result.cp, 0.6267);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessCapability {
    usl: Option<f64>,
    lsl: Option<f64>,
    nominal: Option<f64>,
    subgroup_size: usize,
}

/// Computed capability indices, rounded to four decimals.
///
/// # Index interpretation
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp/Pp | >= 1.33 | Process is capable |
/// | Cpk/Ppk | >= 1.33 | Process is capable and centered |
/// | Cpm | >= 1.33 | Process meets Taguchi loss criterion |
///
/// A `0.0` index means "not computed" when its limits were not supplied,
/// or that the sample has no spread to divide by.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityResult {
    /// Pp = (USL - LSL) / (6 * sigma_overall). Requires both limits.
    pub pp: f64,
    /// Ppk = min(Ppu, Ppl), or the one available.
    pub ppk: f64,
    /// Ppu = (USL - mean) / (3 * sigma_overall). Requires USL.
    pub ppu: f64,
    /// Ppl = (mean - LSL) / (3 * sigma_overall). Requires LSL.
    pub ppl: f64,
    /// Cp = (USL - LSL) / (6 * sigma_within). Requires both limits.
    pub cp: f64,
    /// Cpk = min(Cpu, Cpl), or the one available.
    pub cpk: f64,
    /// Cpu = (USL - mean) / (3 * sigma_within). Requires USL.
    pub cpu: f64,
    /// Cpl = (mean - LSL) / (3 * sigma_within). Requires LSL.
    pub cpl: f64,
    /// K = (mean - nominal) / ((USL - LSL) / 2) * 100. Requires both limits and nominal.
    pub k: f64,
    /// Cpm = (USL - LSL) / (6 * sqrt(sigma_overall^2 + (mean - nominal)^2)).
    /// Requires both limits and nominal.
    ///
    /// Reference: Chan, Cheng & Spiring (1988).
    pub cpm: f64,
    /// USL - (USL - LSL) / 6. Requires both limits.
    pub ucl: f64,
    /// LSL + (USL - LSL) / 6. Requires both limits.
    pub lcl: f64,
    /// Sample mean, the centre used by every index.
    pub mean: f64,
    /// Long-term (overall) standard deviation.
    pub std_dev_overall: f64,
    /// Short-term (within-group) standard deviation.
    pub std_dev_within: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
}

impl ProcessCapability {
    /// Creates a specification from optional upper and lower limits.
    ///
    /// Non-finite limits are treated as absent.
    pub fn new(usl: Option<f64>, lsl: Option<f64>) -> Self {
        Self {
            usl: usl.filter(|u| u.is_finite()),
            lsl: lsl.filter(|l| l.is_finite()),
            nominal: None,
            subgroup_size: DEFAULT_SUBGROUP_SIZE,
        }
    }

    /// Sets the nominal (target) value used by K and Cpm.
    pub fn with_nominal(mut self, nominal: impl Into<Option<f64>>) -> Self {
        self.nominal = nominal.into().filter(|n| n.is_finite());
        self
    }

    /// Sets the rational subgroup size used for the within sigma.
    ///
    /// `1` means individual observations (moving range); 2..=10 use
    /// subgroup ranges; anything else uses the overall sigma.
    pub fn with_subgroup_size(mut self, subgroup_size: usize) -> Self {
        self.subgroup_size = subgroup_size;
        self
    }

    /// Computes all indices for a numeric sample in capture order.
    ///
    /// # Returns
    ///
    /// `None` if `data` is empty.
    pub fn compute(&self, data: &[f64]) -> Option<CapabilityResult> {
        if data.is_empty() {
            return None;
        }
        let stats = DescriptiveStats::from_sample(data);
        let sigma_within = sigma_within(data, self.subgroup_size, stats.std_dev);
        Some(self.compute_indices(&stats, sigma_within))
    }

    /// Internal computation of all indices given the summary and within sigma.
    fn compute_indices(&self, stats: &DescriptiveStats, sigma_within: f64) -> CapabilityResult {
        let x_bar = stats.mean;
        let sigma_overall = stats.std_dev;

        let (cp, cpu, cpl, cpk) = self.family(x_bar, sigma_within);
        let (pp, ppu, ppl, ppk) = self.family(x_bar, sigma_overall);

        let (k, cpm) = match (self.usl, self.lsl, self.nominal) {
            (Some(u), Some(l), Some(n)) => {
                let k = ratio(x_bar - n, 0.5 * (u - l)) * 100.0;
                let tau = (sigma_overall.powi(2) + (x_bar - n).powi(2)).sqrt();
                (k, ratio(u - l, 6.0 * tau))
            }
            _ => (0.0, 0.0),
        };

        let (ucl, lcl) = match (self.usl, self.lsl) {
            (Some(u), Some(l)) => {
                let tolerance = u - l;
                (u - tolerance / 6.0, l + tolerance / 6.0)
            }
            _ => (0.0, 0.0),
        };

        CapabilityResult {
            pp: round4(pp),
            ppk: round4(ppk),
            ppu: round4(ppu),
            ppl: round4(ppl),
            cp: round4(cp),
            cpk: round4(cpk),
            cpu: round4(cpu),
            cpl: round4(cpl),
            k: round4(k),
            cpm: round4(cpm),
            ucl: round4(ucl),
            lcl: round4(lcl),
            mean: round4(x_bar),
            std_dev_overall: round4(sigma_overall),
            std_dev_within: round4(sigma_within),
            min: round4(stats.min),
            max: round4(stats.max),
        }
    }

    /// Returns `(two-sided, upper, lower, worst)` for one sigma estimate.
    fn family(&self, x_bar: f64, sigma: f64) -> (f64, f64, f64, f64) {
        let upper = self.usl.map(|u| ratio(u - x_bar, 3.0 * sigma));
        let lower = self.lsl.map(|l| ratio(x_bar - l, 3.0 * sigma));
        let spread = match (self.usl, self.lsl) {
            (Some(u), Some(l)) => ratio(u - l, 6.0 * sigma),
            _ => 0.0,
        };
        let worst = match (upper, lower) {
            (Some(u), Some(l)) => u.min(l),
            (Some(u), None) => u,
            (None, Some(l)) => l,
            (None, None) => 0.0,
        };
        (spread, upper.unwrap_or(0.0), lower.unwrap_or(0.0), worst)
    }
}

/// Computes capability for raw result entries.
///
/// Unparseable entries are dropped first. Returns `None` when no numeric
/// entry remains.
///
/// # Examples
///
/// ```
/// use u_inspection::capability::compute_capability;
/// use u_inspection::sample::RawValue;
///
/// let raw: Vec<RawValue> = ["10.5", "11.0", "11.5", "11.0"].into_iter().map(RawValue::from).collect();
/// let r = compute_capability(&raw, Some(8.0), Some(12.0), Some(10.0), 2).unwrap();
/// assert_eq!(r.k, 50.0);
/// assert_eq!(r.cpk, 0.752);
///
/// assert!(compute_capability(&[RawValue::from("n/a")], Some(8.0), Some(12.0), None, 1).is_none());
/// ```
pub fn compute_capability(
    raw: &[RawValue],
    min: Option<f64>,
    max: Option<f64>,
    nominal: Option<f64>,
    subgroup_size: usize,
) -> Option<CapabilityResult> {
    ProcessCapability::new(max, min)
        .with_nominal(nominal)
        .with_subgroup_size(subgroup_size)
        .compute(&numeric_sample(raw))
}

/// Division that yields `0.0` instead of an infinity or `NaN`.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    let q = numerator / denominator;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}
