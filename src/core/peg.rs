//! Peg ratio calculator
//!
//! Pure numeric formatting of a token's measured unit value against a
//! reference unit value (always 1 for the USD-peg lookup). The external
//! price feed is not this module's concern.

use eyre::{bail, Result};
use serde::{Deserialize, Serialize};

/// Peg relationship in three renderings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegRatio {
    /// Raw ratio value / reference
    pub decimal: f64,
    /// Ratio as a percentage with 4 decimal places
    pub percentage: String,
    /// Rounded integer ratio, smaller side normalized to 1
    pub ratio: String,
}

/// Compute and format the peg ratio.
///
/// A zero reference, or a ratio that comes out zero, negative, or
/// non-finite, is invalid input and is rejected rather than formatted.
pub fn format_peg_ratio(value: f64, reference: f64) -> Result<PegRatio> {
    if reference == 0.0 || !reference.is_finite() {
        bail!("reference value must be finite and non-zero");
    }
    if !value.is_finite() {
        bail!("measured value must be finite");
    }

    let ratio = value / reference;
    if ratio <= 0.0 || !ratio.is_finite() {
        bail!("peg ratio {} cannot be formatted", ratio);
    }

    let formatted = if ratio < 1.0 {
        format!("1:{}", (1.0 / ratio).round() as u64)
    } else {
        format!("{}:1", ratio.round() as u64)
    };

    Ok(PegRatio {
        decimal: ratio,
        percentage: format!("{:.4}%", ratio * 100.0),
        ratio: formatted,
    })
}
