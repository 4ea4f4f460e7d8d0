//! Inversion of the area–Mach relation.
//!
//! `A/A*` falls monotonically from infinity to one on `0 < M < 1` and rises
//! monotonically from one on `M > 1`, so every area ratio above one has
//! exactly one subsonic and one supersonic solution. The caller picks the
//! [`Branch`] and the root is found by bisection on that branch's bracket.
//!
//! Bisection uses a log-space split with a relative stopping rule, so a root
//! near `M = 1e-9` is resolved to the same relative precision as one near
//! `M = 3`.

use std::fmt;

use nozzle_solve::{
    Equation,
    bisection::{self, Action, Event, Expansion, Status, expand_right},
};
use tracing::{debug, trace};

use crate::{FlowError, HeatCapacityRatio, isentropic};

/// Offset that keeps the brackets off `M = 1`.
const THROAT_OFFSET: f64 = 1e-12;

/// Lower bound of the subsonic bracket. Area ratios up to about `1e307`
/// have their subsonic root above it.
const SUBSONIC_LOWER: f64 = f64::MIN_POSITIVE;

/// Default relative tolerance on the Mach number, about one ulp.
pub const MACH_REL_TOL: f64 = f64::EPSILON;

/// Initial upper bound of the supersonic bracket, before any expansion.
const SUPERSONIC_UPPER: f64 = 50.0;

/// Which solution of the area–Mach relation to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Branch {
    /// Converging-section root, `0 < M < 1`.
    Subsonic,
    /// Diverging-section root, `M > 1`.
    #[default]
    Supersonic,
}

impl Branch {
    /// Returns the opposite branch.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Branch::Subsonic => Branch::Supersonic,
            Branch::Supersonic => Branch::Subsonic,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Branch::Subsonic => "subsonic",
            Branch::Supersonic => "supersonic",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numerical settings for [`mach_from_area_ratio`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachSolver {
    /// Bisection tolerances and iteration budget.
    pub config: bisection::Config,
    /// Growth of the supersonic upper bound when it does not bracket the root.
    pub expansion: Expansion,
}

impl Default for MachSolver {
    fn default() -> Self {
        Self {
            config: bisection::Config::scale_free(MACH_REL_TOL),
            expansion: Expansion::default(),
        }
    }
}

/// Residual `A(M)/A* / target - 1` for a fixed `γ`.
///
/// Where `A/A*` overflows, `ln(A/A*) - ln(target)` stands in. It has the
/// same sign, which is all bisection needs far from the root.
struct AreaMachEquation {
    target: f64,
    gamma: HeatCapacityRatio,
}

impl Equation for AreaMachEquation {
    type Error = FlowError;

    fn residual(&self, mach: f64) -> Result<f64, Self::Error> {
        let area = isentropic::area_ratio(mach, self.gamma)?;
        if area.is_finite() {
            Ok(area / self.target - 1.0)
        } else {
            Ok(isentropic::ln_area_ratio(mach, self.gamma)? - self.target.ln())
        }
    }
}

/// Solves `A(M)/A* = area_ratio` for the Mach number on the given branch.
///
/// # Errors
///
/// Returns [`FlowError::InvalidInput`] if `area_ratio` is not finite and
/// greater than one, or [`FlowError::NonConvergence`] if the root cannot be
/// bracketed or bisection runs out of iterations.
pub fn mach_from_area_ratio(
    area_ratio: f64,
    gamma: HeatCapacityRatio,
    branch: Branch,
    solver: &MachSolver,
) -> Result<f64, FlowError> {
    if !area_ratio.is_finite() || area_ratio <= 1.0 {
        return Err(FlowError::invalid_input(
            "A/A*",
            area_ratio,
            "must be finite and greater than 1",
        ));
    }

    let equation = AreaMachEquation {
        target: area_ratio,
        gamma,
    };

    let bracket = match branch {
        Branch::Subsonic => [SUBSONIC_LOWER, 1.0 - THROAT_OFFSET],
        Branch::Supersonic => expand_right(
            &equation,
            [1.0 + THROAT_OFFSET, SUPERSONIC_UPPER],
            &solver.expansion,
        )
        .map_err(|source| {
            FlowError::non_convergence(
                format!("could not bracket the supersonic root for A/A* = {area_ratio}"),
                Some(source),
            )
        })?,
    };

    let observer = |event: &Event<'_>| {
        trace!(
            %branch,
            iter = event.iter,
            mach = event.eval.x,
            relative_residual = event.eval.residual,
            "area-Mach bisection step"
        );
        None::<Action>
    };

    let solution =
        bisection::solve(&equation, bracket, &solver.config, observer).map_err(|source| {
            FlowError::non_convergence(
                format!("{branch} area-Mach inversion failed for A/A* = {area_ratio}"),
                Some(source),
            )
        })?;

    match solution.status {
        Status::Converged => {
            debug!(
                %branch,
                area_ratio,
                mach = solution.x,
                iters = solution.iters,
                "solved area-Mach relation"
            );
            Ok(solution.x)
        }
        Status::MaxIters | Status::StoppedByObserver => Err(FlowError::non_convergence(
            format!(
                "{branch} area-Mach inversion stopped after {} iterations \
                 (M = {}, relative residual = {})",
                solution.iters, solution.x, solution.residual
            ),
            None,
        )),
    }
}
