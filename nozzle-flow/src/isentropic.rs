//! Closed-form isentropic flow relations.
//!
//! All static-to-stagnation ratios are written in terms of the stagnation
//! factor `T0/T = 1 + (γ - 1)/2 · M²`:
//!
//! - `T/T0 = (T0/T)^-1`
//! - `p/p0 = (T0/T)^(-γ/(γ-1))`
//! - `ρ/ρ0 = (T0/T)^(-1/(γ-1))`
//! - `A/A* = (1/M) · [(2/(γ+1)) · T0/T]^((γ+1)/(2(γ-1)))`

use crate::{FlowError, HeatCapacityRatio};

/// Computes the static-to-stagnation temperature ratio `T/T0`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `mach` is negative or non-finite.
pub fn temperature_ratio(mach: f64, gamma: HeatCapacityRatio) -> Result<f64, FlowError> {
    let mach = check_mach(mach)?;
    Ok(stagnation_factor(mach, gamma).recip())
}

/// Computes the static-to-stagnation pressure ratio `p/p0`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `mach` is negative or non-finite.
pub fn pressure_ratio(mach: f64, gamma: HeatCapacityRatio) -> Result<f64, FlowError> {
    let mach = check_mach(mach)?;
    let g = gamma.value();
    Ok(stagnation_factor(mach, gamma).powf(-g / (g - 1.0)))
}

/// Computes the static-to-stagnation density ratio `ρ/ρ0`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `mach` is negative or non-finite.
pub fn density_ratio(mach: f64, gamma: HeatCapacityRatio) -> Result<f64, FlowError> {
    let mach = check_mach(mach)?;
    let g = gamma.value();
    Ok(stagnation_factor(mach, gamma).powf(-1.0 / (g - 1.0)))
}

/// Computes the local-to-sonic area ratio `A/A*`.
///
/// Sonic flow returns exactly one.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `mach` is not strictly positive,
/// since the area ratio is unbounded as `M → 0`.
pub fn area_ratio(mach: f64, gamma: HeatCapacityRatio) -> Result<f64, FlowError> {
    let mach = check_positive_mach(mach)?;

    #[allow(clippy::float_cmp)]
    if mach == 1.0 {
        return Ok(1.0);
    }

    let (base, exponent) = area_ratio_terms(mach, gamma);
    Ok(base.powf(exponent) / mach)
}

/// Computes `ln(A/A*)`.
///
/// Stays finite where [`area_ratio`] overflows: for `γ` near one the
/// exponent `(γ+1)/(2(γ-1))` is large, and `A/A*` passes `f64::MAX` at
/// moderate Mach numbers (around `M = 50` for `γ = 1.001`).
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `mach` is not strictly positive.
pub fn ln_area_ratio(mach: f64, gamma: HeatCapacityRatio) -> Result<f64, FlowError> {
    let mach = check_positive_mach(mach)?;

    #[allow(clippy::float_cmp)]
    if mach == 1.0 {
        return Ok(0.0);
    }

    let (base, exponent) = area_ratio_terms(mach, gamma);
    Ok(exponent * base.ln() - mach.ln())
}

/// Inverts [`pressure_ratio`] to find the Mach number that expands to `p/p0`.
///
/// Accurate up to the largest float below one, where `p0/p - 1` is far
/// smaller than the spacing of floats near one.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] unless `0 < p/p0 <= 1`.
pub fn mach_from_pressure_ratio(
    pressure_ratio: f64,
    gamma: HeatCapacityRatio,
) -> Result<f64, FlowError> {
    if !(pressure_ratio > 0.0 && pressure_ratio <= 1.0) {
        return Err(FlowError::invalid_input(
            "p/p0",
            pressure_ratio,
            "must be in (0, 1]",
        ));
    }

    let g = gamma.value();
    // T0/T - 1 = (p/p0)^(-(γ-1)/γ) - 1
    let excess = (-(g - 1.0) / g * (pressure_ratio - 1.0).ln_1p()).exp_m1();
    Ok((excess / gamma.half_gm1()).max(0.0).sqrt())
}

/// Returns `T0/T = 1 + (γ - 1)/2 · M²`.
fn stagnation_factor(mach: f64, gamma: HeatCapacityRatio) -> f64 {
    1.0 + gamma.half_gm1() * mach * mach
}

/// Returns `2/(γ+1) · T0/T` and the exponent `(γ+1)/(2(γ-1))`.
fn area_ratio_terms(mach: f64, gamma: HeatCapacityRatio) -> (f64, f64) {
    let g = gamma.value();
    let base = 2.0 / (g + 1.0) * stagnation_factor(mach, gamma);
    (base, (g + 1.0) / (2.0 * (g - 1.0)))
}

fn check_positive_mach(mach: f64) -> Result<f64, FlowError> {
    if mach.is_finite() && mach > 0.0 {
        Ok(mach)
    } else {
        Err(FlowError::invalid_input(
            "Mach number",
            mach,
            "must be finite and greater than 0",
        ))
    }
}

fn check_mach(mach: f64) -> Result<f64, FlowError> {
    if mach.is_finite() && mach >= 0.0 {
        Ok(mach)
    } else {
        Err(FlowError::invalid_input(
            "Mach number",
            mach,
            "must be finite and non-negative",
        ))
    }
}
