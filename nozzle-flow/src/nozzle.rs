//! Ideal nozzle exit conditions and thrust coefficient.
//!
//! The nozzle is treated as quasi-one-dimensional with isentropic flow from
//! the chamber (stagnation conditions) to the exit plane, choked at the
//! throat, so the throat area is `A*` and `Ae/At = Ae/A*`.

use uom::si::{
    f64::{SpecificHeatCapacity, ThermodynamicTemperature, Velocity},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::{Branch, FlowError, HeatCapacityRatio, MachSolver, isentropic, mach_from_area_ratio};

/// Specific gas constant `R = Ru/M`, J/kg·K in SI.
pub type SpecificGasConstant = SpecificHeatCapacity;

/// Flow state at the nozzle exit plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitState {
    /// Exit-to-throat area ratio `Ae/At`.
    pub area_ratio: f64,
    /// Branch the exit Mach number was solved on.
    pub branch: Branch,
    /// Exit Mach number `Me`.
    pub mach: f64,
    /// Exit-to-stagnation pressure ratio `pe/p0`.
    pub pressure_ratio: f64,
    /// Exit-to-stagnation temperature ratio `Te/T0`.
    pub temperature_ratio: f64,
}

/// Chamber conditions needed for a dimensional exit velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagnation {
    pub temperature: ThermodynamicTemperature,
    pub gas_constant: SpecificGasConstant,
}

/// Exit velocity, dimensional when chamber conditions are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExitVelocity {
    /// `Ve = Me·sqrt(γ·R·Te)`.
    Absolute(Velocity),
    /// `Ve/a0 = Me·sqrt(Te/T0)`, normalized by the stagnation speed of sound.
    Normalized(f64),
}

/// Solves the exit Mach number for `Ae/At`, then the exit pressure and
/// temperature ratios.
///
/// # Errors
///
/// Returns an error if the area ratio is out of domain or the Mach inversion
/// does not converge.
pub fn exit_state(
    area_ratio: f64,
    gamma: HeatCapacityRatio,
    branch: Branch,
    solver: &MachSolver,
) -> Result<ExitState, FlowError> {
    let mach = mach_from_area_ratio(area_ratio, gamma, branch, solver)?;

    Ok(ExitState {
        area_ratio,
        branch,
        mach,
        pressure_ratio: exit_pressure_ratio(mach, gamma)?,
        temperature_ratio: isentropic::temperature_ratio(mach, gamma)?,
    })
}

/// Computes the exit-to-stagnation pressure ratio `pe/p0` for an exit Mach number.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `mach` is negative or non-finite.
pub fn exit_pressure_ratio(mach: f64, gamma: HeatCapacityRatio) -> Result<f64, FlowError> {
    isentropic::pressure_ratio(mach, gamma)
}

/// Computes the exit velocity from the exit Mach number.
///
/// With `stagnation` the result is dimensional, using the static exit
/// temperature `Te = T0·(Te/T0)` for the local speed of sound. Without it
/// the velocity is normalized by the stagnation speed of sound `a0`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `mach` is negative, or if the
/// stagnation temperature or gas constant is not strictly positive.
pub fn exit_velocity(
    mach: f64,
    gamma: HeatCapacityRatio,
    stagnation: Option<&Stagnation>,
) -> Result<ExitVelocity, FlowError> {
    let temperature_ratio = isentropic::temperature_ratio(mach, gamma)?;

    let Some(stagnation) = stagnation else {
        return Ok(ExitVelocity::Normalized(mach * temperature_ratio.sqrt()));
    };

    let t0 = stagnation.temperature.get::<kelvin>();
    if !t0.is_finite() || t0 <= 0.0 {
        return Err(FlowError::invalid_input(
            "T0 [K]",
            t0,
            "must be finite and greater than 0",
        ));
    }

    let r = stagnation.gas_constant.get::<joule_per_kilogram_kelvin>();
    if !r.is_finite() || r <= 0.0 {
        return Err(FlowError::invalid_input(
            "R [J/kg/K]",
            r,
            "must be finite and greater than 0",
        ));
    }

    let speed_of_sound = (gamma.value() * r * t0 * temperature_ratio).sqrt();
    Ok(ExitVelocity::Absolute(Velocity::new::<meter_per_second>(
        mach * speed_of_sound,
    )))
}

/// Computes the ideal thrust coefficient `CF = F/(p0·At)`.
///
/// `CF = sqrt(2γ²/(γ-1) · (2/(γ+1))^((γ+1)/(γ-1)) · (1 - (pe/p0)^((γ-1)/γ)))
///      + (pe/p0 - pa/p0)·Ae/At`
///
/// The first term is the momentum thrust and the second the pressure thrust.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] unless `0 <= pe/p0 < 1`,
/// `0 <= pa/p0 < 1` and `Ae/At >= 1`.
pub fn thrust_coefficient(
    gamma: HeatCapacityRatio,
    exit_pressure_ratio: f64,
    ambient_pressure_ratio: f64,
    area_ratio: f64,
) -> Result<f64, FlowError> {
    if !(0.0..1.0).contains(&exit_pressure_ratio) {
        return Err(FlowError::invalid_input(
            "pe/p0",
            exit_pressure_ratio,
            "must be in [0, 1)",
        ));
    }
    if !(0.0..1.0).contains(&ambient_pressure_ratio) {
        return Err(FlowError::invalid_input(
            "pa/p0",
            ambient_pressure_ratio,
            "must be in [0, 1)",
        ));
    }
    if !area_ratio.is_finite() || area_ratio < 1.0 {
        return Err(FlowError::invalid_input(
            "Ae/At",
            area_ratio,
            "must be finite and at least 1",
        ));
    }

    let g = gamma.value();
    let coefficient = 2.0 * g * g / (g - 1.0) * (2.0 / (g + 1.0)).powf((g + 1.0) / (g - 1.0));
    let momentum = (coefficient * (1.0 - exit_pressure_ratio.powf((g - 1.0) / g))).sqrt();
    let pressure = (exit_pressure_ratio - ambient_pressure_ratio) * area_ratio;

    Ok(momentum + pressure)
}

/// Computes the thrust coefficient directly from nozzle geometry:
/// `Ae/At → Me → pe/p0 → CF`.
///
/// # Errors
///
/// Returns an error if any input is out of domain or the Mach inversion
/// does not converge.
pub fn thrust_coefficient_from_geometry(
    gamma: HeatCapacityRatio,
    area_ratio: f64,
    ambient_pressure_ratio: f64,
    branch: Branch,
    solver: &MachSolver,
) -> Result<f64, FlowError> {
    let exit = exit_state(area_ratio, gamma, branch, solver)?;
    thrust_coefficient(gamma, exit.pressure_ratio, ambient_pressure_ratio, area_ratio)
}

/// Computes the area ratio `Ae/At` that expands the flow exactly to `pa/p0`.
///
/// Above the critical pressure ratio the design point is subsonic, and the
/// area ratio grows without bound as `pa/p0 → 1`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] unless `0 < pa/p0 < 1`.
pub fn ideal_area_ratio(
    ambient_pressure_ratio: f64,
    gamma: HeatCapacityRatio,
) -> Result<f64, FlowError> {
    #[allow(clippy::float_cmp)]
    if ambient_pressure_ratio == 1.0 {
        return Err(FlowError::invalid_input(
            "pa/p0",
            ambient_pressure_ratio,
            "must be in (0, 1)",
        ));
    }

    let mach = isentropic::mach_from_pressure_ratio(ambient_pressure_ratio, gamma)?;
    isentropic::area_ratio(mach, gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const AIR: HeatCapacityRatio = HeatCapacityRatio::DIATOMIC;

    #[test]
    fn exit_state_is_physical_on_supersonic_branch() {
        let exit = exit_state(10.0, AIR, Branch::Supersonic, &MachSolver::default()).unwrap();

        assert_relative_eq!(exit.area_ratio, 10.0);
        assert_eq!(exit.branch, Branch::Supersonic);
        assert_relative_eq!(exit.mach, 3.922_552, epsilon = 1e-6);
        assert_relative_eq!(exit.pressure_ratio, 0.007_306_4, epsilon = 1e-7);
        assert_relative_eq!(exit.temperature_ratio, 0.245_261, epsilon = 1e-6);
    }

    #[test]
    fn subsonic_exit_barely_expands() {
        let exit = exit_state(10.0, AIR, Branch::Subsonic, &MachSolver::default()).unwrap();

        assert!(exit.mach < 1.0);
        assert!(exit.pressure_ratio > 0.99);
    }

    #[test]
    fn normalized_velocity_without_chamber_conditions() {
        let velocity = exit_velocity(2.0, AIR, None).unwrap();

        // Me·sqrt(Te/T0) = 2·sqrt(1/1.8)
        match velocity {
            ExitVelocity::Normalized(ratio) => {
                assert_relative_eq!(ratio, 1.490_711_985, epsilon = 1e-9);
            }
            ExitVelocity::Absolute(_) => panic!("expected a normalized velocity"),
        }
    }

    #[test]
    fn dimensional_velocity_with_chamber_conditions() {
        let stagnation = Stagnation {
            temperature: ThermodynamicTemperature::new::<kelvin>(1800.0),
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0),
        };

        let velocity = exit_velocity(2.0, AIR, Some(&stagnation)).unwrap();

        // Te = 1800/1.8 = 1000 K, a = sqrt(1.4·287·1000), Ve = 2a.
        let expected = 2.0 * (1.4_f64 * 287.0 * 1000.0).sqrt();
        match velocity {
            ExitVelocity::Absolute(v) => {
                assert_relative_eq!(v.get::<meter_per_second>(), expected, epsilon = 1e-9);
            }
            ExitVelocity::Normalized(_) => panic!("expected a dimensional velocity"),
        }
    }

    #[test]
    fn velocity_rejects_bad_chamber_conditions() {
        let stagnation = Stagnation {
            temperature: ThermodynamicTemperature::new::<kelvin>(0.0),
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0),
        };
        let err = exit_velocity(2.0, AIR, Some(&stagnation)).unwrap_err();
        assert!(err.is_invalid_input());

        assert!(exit_velocity(-1.0, AIR, None).unwrap_err().is_invalid_input());
    }

    #[test]
    fn thrust_coefficient_for_reference_nozzle() {
        let cf = thrust_coefficient_from_geometry(
            AIR,
            10.0,
            0.02,
            Branch::Supersonic,
            &MachSolver::default(),
        )
        .unwrap();

        assert!(cf.is_finite());
        assert_relative_eq!(cf, 1.446_929, epsilon = 1e-5);
    }

    #[test]
    fn matched_nozzle_has_no_pressure_thrust() {
        let pe = 0.05;
        let area_ratio = ideal_area_ratio(pe, AIR).unwrap();

        let matched = thrust_coefficient(AIR, pe, pe, area_ratio).unwrap();
        let vacuum = thrust_coefficient(AIR, pe, 0.0, area_ratio).unwrap();

        assert_relative_eq!(vacuum - matched, pe * area_ratio, epsilon = 1e-12);
    }

    #[test]
    fn thrust_coefficient_tends_to_limit_for_full_expansion() {
        // Ideal CF for infinite expansion into vacuum, γ = 1.4.
        let cf = thrust_coefficient(AIR, 0.0, 0.0, 1.0).unwrap();
        assert_relative_eq!(cf, 1.811_629_148, epsilon = 1e-8);
    }

    #[test]
    fn thrust_coefficient_validates_inputs() {
        assert!(thrust_coefficient(AIR, 1.0, 0.02, 10.0).unwrap_err().is_invalid_input());
        assert!(thrust_coefficient(AIR, 0.01, -0.1, 10.0).unwrap_err().is_invalid_input());
        assert!(thrust_coefficient(AIR, 0.01, 0.02, 0.5).unwrap_err().is_invalid_input());
        assert!(thrust_coefficient(AIR, f64::NAN, 0.02, 10.0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn ideal_area_ratio_matches_ambient() {
        let area_ratio = ideal_area_ratio(0.02, AIR).unwrap();
        assert_relative_eq!(area_ratio, 5.158_478, epsilon = 1e-6);

        let exit = exit_state(area_ratio, AIR, Branch::Supersonic, &MachSolver::default()).unwrap();
        assert_relative_eq!(exit.pressure_ratio, 0.02, epsilon = 1e-9);

        assert!(ideal_area_ratio(1.0, AIR).unwrap_err().is_invalid_input());
        assert!(ideal_area_ratio(0.0, AIR).unwrap_err().is_invalid_input());
    }

    #[test]
    fn ideal_area_ratio_near_unit_ambient_is_large_but_finite() {
        let pa = 0.999_999_999_999_999_89;
        let area_ratio = ideal_area_ratio(pa, AIR).unwrap();

        // M ≈ 1.26e-8 on the subsonic branch, so A/A* ≈ 0.5787 / M.
        assert!(area_ratio.is_finite());
        assert_relative_eq!(area_ratio, 4.595e7, max_relative = 1e-3);
    }
}
