//! Raw sample entries and their numeric projection.
//!
//! Inspection grids hold whatever the operator typed: numbers, numeric text
//! with units, blanks, or attribute words such as `OK`. Every statistic in
//! this crate works on the *numeric sample*: the entries that parse to a
//! finite real, in capture order, with everything else dropped (never
//! zero-filled).
//!
//! # Examples
//!
//! ```
//! use u_inspection::sample::{numeric_sample, RawValue};
//!
//! let raw = vec![
//!     RawValue::from("10.02"),
//!     RawValue::Empty,
//!     RawValue::from(9.98),
//!     RawValue::from("n/a"),
//!     RawValue::from(" 10.01 mm"),
//! ];
//! assert_eq!(numeric_sample(&raw), vec![10.02, 9.98, 10.01]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of decimals every derived figure is rounded to.
pub const DECIMALS: usize = 4;

/// Magnitude from which an `f64` carries no digits below `1e-4`.
pub const EXACT_LIMIT: f64 = 1e15;

/// One captured result cell.
///
/// Deserializes from JSON `null`, a number, or a string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// A value captured as a number.
    Number(f64),
    /// A value captured as text (numeric or attribute word).
    Text(String),
}

impl RawValue {
    /// Returns `true` for a missing cell or text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Number(_) => false,
            RawValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Empty => Ok(()),
            RawValue::Number(x) => write!(f, "{x}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Number(x)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Empty, Into::into)
    }
}

/// Parses one raw entry as a finite number.
///
/// Text is read the way capture forms read it: leading whitespace is
/// skipped and the longest leading decimal literal is taken, so `"12.5 mm"`
/// is `12.5`. Blank, non-numeric and non-finite entries yield `None`.
///
/// # Examples
///
/// ```
/// use u_inspection::sample::{parse_numeric, RawValue};
///
/// assert_eq!(parse_numeric(&RawValue::from("-0.5e1")), Some(-5.0));
/// assert_eq!(parse_numeric(&RawValue::from("3,2")), Some(3.0));
/// assert_eq!(parse_numeric(&RawValue::from("OK")), None);
/// assert_eq!(parse_numeric(&RawValue::from(f64::NAN)), None);
/// assert_eq!(parse_numeric(&RawValue::Empty), None);
/// ```
pub fn parse_numeric(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Empty => None,
        RawValue::Number(x) => x.is_finite().then_some(*x),
        RawValue::Text(s) => {
            let literal = leading_decimal(s)?;
            literal.parse::<f64>().ok().filter(|x| x.is_finite())
        }
    }
}

/// Projects raw entries onto the numeric sample, keeping capture order.
pub fn numeric_sample(values: &[RawValue]) -> Vec<f64> {
    values.iter().filter_map(parse_numeric).collect()
}

/// Rounds half away from zero to [`DECIMALS`] places.
///
/// Ties are decided on the exact binary value, as [`to_fixed`] does, so
/// `0.00035` (stored just below the tie) rounds down. Non-finite input rounds
/// to `0.0` so that guarded ratios never leak `NaN` or infinity into a
/// report; magnitudes beyond [`EXACT_LIMIT`] are returned unchanged.
///
/// # Examples
///
/// ```
/// use u_inspection::sample::round4;
///
/// assert_eq!(round4(0.12345), 0.1235);
/// assert_eq!(round4(-0.12345), -0.1235);
/// assert_eq!(round4(0.00035), 0.0003);
/// assert_eq!(round4(f64::INFINITY), 0.0);
/// ```
pub fn round4(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    if x.abs() >= EXACT_LIMIT {
        return x;
    }
    let rounded = to_fixed(x, DECIMALS).parse::<f64>().unwrap_or(x);
    // Collapse -0.0 so reports never print a signed zero.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a finite value with `decimals` fraction digits.
///
/// Rounds half away from zero on the exact binary value of `x`. A negative
/// input keeps its sign even when it rounds to zero (`-0.0001` at three
/// places is `"-0.000"`), while `-0.0` itself prints unsigned.
///
/// # Examples
///
/// ```
/// use u_inspection::sample::to_fixed;
///
/// assert_eq!(to_fixed(0.03125, 4), "0.0313");
/// assert_eq!(to_fixed(-0.0625, 3), "-0.063");
/// assert_eq!(to_fixed(-0.0, 3), "0.000");
/// assert_eq!(to_fixed(2.5, 0), "3");
/// ```
pub fn to_fixed(x: f64, decimals: usize) -> String {
    let sign = if x < 0.0 { "-" } else { "" };
    let magnitude = x.abs();
    match rounded_up_tie(magnitude, decimals) {
        Some(scaled) if decimals == 0 => format!("{sign}{scaled}"),
        Some(scaled) => {
            let unit = 10_u128.pow(decimals as u32);
            format!(
                "{sign}{}.{:0width$}",
                scaled / unit,
                scaled % unit,
                width = decimals
            )
        }
        None => format!("{sign}{magnitude:.decimals$}"),
    }
}

/// Scaled value rounded up when `y` lies exactly halfway between two
/// `decimals`-place neighbours, `None` otherwise.
///
/// A tie `y = (2k + 1) / (2 * 10^d)` is representable in binary only when it
/// is an odd multiple of `2^-(d + 1)`, so the check is exact.
fn rounded_up_tie(y: f64, decimals: usize) -> Option<u128> {
    if y >= EXACT_LIMIT || decimals > 16 {
        return None;
    }
    let halves = y * 2_f64.powi(decimals as i32 + 1);
    if halves.fract() != 0.0 || halves % 2.0 != 1.0 {
        return None;
    }
    let fives = 5_u128.checked_pow(decimals as u32)?;
    (halves as u128).checked_mul(fives).map(|n| (n + 1) / 2)
}

/// Returns the longest leading `[+-]digits[.digits][e[+-]digits]` slice.
fn leading_decimal(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(&s[..end])
}
