use clap::{ArgAction, Parser, ValueEnum};
use nozzle_flow::{Branch, MachSolver, regime::DEFAULT_RTOL};

/// Command-line inputs for a single nozzle analysis.
#[derive(Debug, Clone, Parser)]
#[command(name = "nozzle")]
#[command(about = "Ideal nozzle analysis: exit Mach, expansion regime, and thrust coefficient")]
#[command(allow_negative_numbers = true)]
pub struct Args {
    /// Ratio of specific heats gamma (> 1)
    #[arg(long)]
    pub gamma: f64,

    /// Exit-to-throat area ratio Ae/At (> 1)
    #[arg(long = "Ae_At", value_name = "AE_AT")]
    pub area_ratio: f64,

    /// Ambient-to-stagnation pressure ratio pa/p0, in (0, 1)
    #[arg(long = "pa_p0", value_name = "PA_P0")]
    pub ambient_pressure_ratio: f64,

    /// Branch of the area-Mach relation used for the exit state
    #[arg(long, value_enum, default_value_t = BranchArg::Supersonic)]
    pub branch: BranchArg,

    /// Relative tolerance for the ideally-expanded check
    #[arg(long, default_value_t = DEFAULT_RTOL)]
    pub rtol: f64,

    /// Stagnation temperature in kelvin, for a dimensional exit velocity
    #[arg(long)]
    pub t0: Option<f64>,

    /// Specific gas constant in J/kg/K, used with --t0
    #[arg(long, default_value_t = 287.05)]
    pub gas_constant: f64,

    /// Relative bisection tolerance on the Mach number (>= 0)
    #[arg(long)]
    pub tol: Option<f64>,

    /// Bisection iteration budget
    #[arg(long)]
    pub max_iters: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the Mach solver settings, applying any overrides.
    #[must_use]
    pub fn solver(&self) -> MachSolver {
        let mut solver = MachSolver::default();
        if let Some(tol) = self.tol {
            solver.config.x_rel_tol = tol;
        }
        if let Some(max_iters) = self.max_iters {
            solver.config.max_iters = max_iters;
        }
        solver
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BranchArg {
    Subsonic,
    Supersonic,
}

impl From<BranchArg> for Branch {
    fn from(arg: BranchArg) -> Self {
        match arg {
            BranchArg::Subsonic => Branch::Subsonic,
            BranchArg::Supersonic => Branch::Supersonic,
        }
    }
}
