use std::fmt;

use serde::Serialize;

/// Everything the `nozzle` command reports for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub gamma: f64,
    pub area_ratio: f64,
    pub ambient_pressure_ratio: f64,
    /// Branch used for the exit state.
    pub branch: &'static str,
    pub subsonic_mach: Option<f64>,
    pub supersonic_mach: Option<f64>,
    pub exit_mach: f64,
    pub exit_pressure_ratio: f64,
    pub exit_temperature_ratio: f64,
    pub exit_velocity: VelocityReport,
    pub regime: &'static str,
    pub regime_note: &'static str,
    /// Area ratio that would expand exactly to the ambient pressure.
    pub ideal_area_ratio: f64,
    pub thrust_coefficient: f64,
    pub advisory: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VelocityReport {
    /// Exit velocity in m/s.
    MetersPerSecond(f64),
    /// Exit velocity over the stagnation speed of sound.
    Normalized(f64),
}

impl fmt::Display for VelocityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VelocityReport::MetersPerSecond(v) => write!(f, "Ve = {v:.6} m/s"),
            VelocityReport::Normalized(v) => write!(f, "Ve/a0 = {v:.10}"),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Exit condition")?;
        writeln!(f, "  gamma = {}", self.gamma)?;
        writeln!(f, "  Ae/At = {}", self.area_ratio)?;
        writeln!(f, "  M (subsonic) = {}", optional(self.subsonic_mach))?;
        writeln!(f, "  M (supersonic) = {}", optional(self.supersonic_mach))?;
        writeln!(f, "  branch = {}", self.branch)?;
        writeln!(f, "  Me = {:.10}", self.exit_mach)?;
        writeln!(f, "  pe/p0 = {:.10}", self.exit_pressure_ratio)?;
        writeln!(f, "  Te/T0 = {:.10}", self.exit_temperature_ratio)?;
        writeln!(f, "  {}", self.exit_velocity)?;
        writeln!(f)?;
        writeln!(f, "Analysis")?;
        writeln!(f, "  pa/p0 = {}", self.ambient_pressure_ratio)?;
        writeln!(f, "  regime = {}", self.regime)?;
        writeln!(f, "  note = {}", self.regime_note)?;
        writeln!(f, "  ideal Ae/At = {:.6}", self.ideal_area_ratio)?;
        writeln!(f)?;
        writeln!(f, "Performance")?;
        writeln!(f, "  CF = {:.10}", self.thrust_coefficient)?;
        if let Some(advisory) = self.advisory {
            writeln!(f, "  warning: {advisory}")?;
        }
        Ok(())
    }
}

fn optional(mach: Option<f64>) -> String {
    mach.map_or_else(|| "n/a".to_string(), |m| format!("{m:.10}"))
}
