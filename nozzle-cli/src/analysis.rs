use nozzle_flow::{
    Branch, FlowError, HeatCapacityRatio, mach_from_area_ratio,
    nozzle::{self, ExitVelocity, SpecificGasConstant, Stagnation},
    regime,
};
use tracing::{debug, info, warn};
use uom::si::{
    f64::ThermodynamicTemperature, specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin, velocity::meter_per_second,
};

use crate::{Args, Report, VelocityReport};

/// Runs the full pipeline: solve Mach, compute exit conditions and thrust
/// coefficient, then classify the expansion regime.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] for out-of-domain arguments and
/// [`FlowError::NonConvergence`] if the selected branch cannot be solved.
pub fn analyze(args: &Args) -> Result<Report, FlowError> {
    let gamma = HeatCapacityRatio::new(args.gamma)?;
    let pa_p0 = args.ambient_pressure_ratio;
    if !(pa_p0 > 0.0 && pa_p0 < 1.0) {
        return Err(FlowError::InvalidInput {
            name: "pa/p0",
            value: pa_p0,
            requirement: "must be in (0, 1)",
        });
    }

    if let Some(tol) = args.tol.filter(|tol| !(tol.is_finite() && *tol >= 0.0)) {
        return Err(FlowError::InvalidInput {
            name: "tol",
            value: tol,
            requirement: "must be finite and non-negative",
        });
    }

    let solver = args.solver();
    let branch = Branch::from(args.branch);
    info!(gamma = args.gamma, area_ratio = args.area_ratio, pa_p0, %branch, "analyzing nozzle");

    let exit = nozzle::exit_state(args.area_ratio, gamma, branch, &solver)?;

    // The other root is reported for reference only.
    let other = mach_from_area_ratio(args.area_ratio, gamma, branch.other(), &solver)
        .inspect_err(|err| warn!(branch = %branch.other(), error = %err, "could not solve"))
        .ok();
    let (subsonic_mach, supersonic_mach) = match branch {
        Branch::Subsonic => (Some(exit.mach), other),
        Branch::Supersonic => (other, Some(exit.mach)),
    };

    let stagnation = args.t0.map(|t0| Stagnation {
        temperature: ThermodynamicTemperature::new::<kelvin>(t0),
        gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(args.gas_constant),
    });
    let exit_velocity = match nozzle::exit_velocity(exit.mach, gamma, stagnation.as_ref())? {
        ExitVelocity::Absolute(v) => VelocityReport::MetersPerSecond(v.get::<meter_per_second>()),
        ExitVelocity::Normalized(ratio) => VelocityReport::Normalized(ratio),
    };

    let thrust_coefficient =
        nozzle::thrust_coefficient(gamma, exit.pressure_ratio, pa_p0, args.area_ratio)?;
    let regime = regime::classify(exit.pressure_ratio, pa_p0, args.rtol)?;
    let ideal_area_ratio = nozzle::ideal_area_ratio(pa_p0, gamma)?;
    debug!(%regime, thrust_coefficient, ideal_area_ratio, "analysis complete");

    Ok(Report {
        gamma: gamma.value(),
        area_ratio: args.area_ratio,
        ambient_pressure_ratio: pa_p0,
        branch: branch.as_str(),
        subsonic_mach,
        supersonic_mach,
        exit_mach: exit.mach,
        exit_pressure_ratio: exit.pressure_ratio,
        exit_temperature_ratio: exit.temperature_ratio,
        exit_velocity,
        regime: regime.as_str(),
        regime_note: regime.note(),
        ideal_area_ratio,
        thrust_coefficient,
        advisory: regime::thrust_coefficient_advisory(thrust_coefficient),
    })
}
