//! Process capability analysis.
//!
//! Computes capability indices for assessing how well a characteristic
//! meets its specification limits.
//!
//! # Indices
//!
//! - **Cp**, **Cpk**, **Cpu**, **Cpl** — Short-term capability (within sigma)
//! - **Pp**, **Ppk**, **Ppu**, **Ppl** — Long-term performance (overall sigma)
//! - **Cpm** — Taguchi capability (target deviation)
//! - **K** — Centering index, in percent of the half tolerance
//!
//! # Within Sigma
//!
//! - [`sigma_within`] — R-bar/d2 for subgroups of 2..10, MR-bar/d2 for individuals
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod dispersion;
mod indices;

pub use dispersion::{average_moving_range, average_range, d2, sigma_within, MAX_SUBGROUP_SIZE};
pub use indices::{compute_capability, CapabilityResult, ProcessCapability, DEFAULT_SUBGROUP_SIZE};
