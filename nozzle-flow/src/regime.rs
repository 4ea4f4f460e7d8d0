//! Expansion-regime classification.
//!
//! A nozzle is ideally expanded when its exit pressure matches the ambient
//! pressure. Otherwise the exhaust either keeps expanding outside the nozzle
//! (under-expanded) or is compressed by the ambient, possibly through shocks
//! (over-expanded).

use std::fmt;

use crate::FlowError;

/// Relative tolerance on `|pe - pa| / pa` for calling a nozzle ideally expanded.
pub const DEFAULT_RTOL: f64 = 0.02;

/// Thrust coefficients above this are flagged as implausible.
const MAX_PLAUSIBLE_THRUST_COEFFICIENT: f64 = 5.0;

/// Floor on the ambient pressure ratio when forming the relative error.
const MIN_AMBIENT: f64 = 1e-15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// `pe > pa`: the plume keeps expanding past the exit plane.
    UnderExpanded,
    /// `pe < pa`: the ambient compresses the plume, possibly through shocks.
    OverExpanded,
    /// `pe ≈ pa` within the relative tolerance.
    IdeallyExpanded,
}

impl Regime {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Regime::UnderExpanded => "under-expanded",
            Regime::OverExpanded => "over-expanded",
            Regime::IdeallyExpanded => "ideally-expanded",
        }
    }

    /// Returns a one-line explanation suitable for a report.
    #[must_use]
    pub fn note(self) -> &'static str {
        match self {
            Regime::UnderExpanded => {
                "pe > pa: a larger area ratio would extract more thrust at this ambient pressure"
            }
            Regime::OverExpanded => {
                "pe < pa: the exhaust is over-expanded and may separate or shock inside the nozzle"
            }
            Regime::IdeallyExpanded => "pe ~= pa: the nozzle is matched to the ambient pressure",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the expansion regime from exit and ambient pressure ratios.
///
/// Both ratios share the stagnation pressure `p0`, so comparing `pe/p0` with
/// `pa/p0` compares `pe` with `pa`. The nozzle counts as ideally expanded
/// when `|pe - pa| / pa <= rtol`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `rtol` is negative or non-finite,
/// or if either pressure ratio is NaN.
pub fn classify(
    exit_pressure_ratio: f64,
    ambient_pressure_ratio: f64,
    rtol: f64,
) -> Result<Regime, FlowError> {
    if !rtol.is_finite() || rtol < 0.0 {
        return Err(FlowError::invalid_input(
            "rtol",
            rtol,
            "must be finite and non-negative",
        ));
    }
    if exit_pressure_ratio.is_nan() {
        return Err(FlowError::invalid_input(
            "pe/p0",
            exit_pressure_ratio,
            "must be a number",
        ));
    }
    if ambient_pressure_ratio.is_nan() {
        return Err(FlowError::invalid_input(
            "pa/p0",
            ambient_pressure_ratio,
            "must be a number",
        ));
    }

    let denominator = ambient_pressure_ratio.abs().max(MIN_AMBIENT);
    let relative_error = (exit_pressure_ratio - ambient_pressure_ratio).abs() / denominator;

    if relative_error <= rtol {
        Ok(Regime::IdeallyExpanded)
    } else if exit_pressure_ratio > ambient_pressure_ratio {
        Ok(Regime::UnderExpanded)
    } else {
        Ok(Regime::OverExpanded)
    }
}

/// Flags thrust coefficients that point at inconsistent inputs.
///
/// Returns `None` for plausible values.
#[must_use]
pub fn thrust_coefficient_advisory(thrust_coefficient: f64) -> Option<&'static str> {
    if thrust_coefficient < 0.0 {
        Some("CF is negative: the nozzle produces no net thrust at this ambient pressure")
    } else if thrust_coefficient > MAX_PLAUSIBLE_THRUST_COEFFICIENT {
        Some("CF is unusually large: check the area and pressure ratios")
    } else {
        None
    }
}
