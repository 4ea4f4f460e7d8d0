//! One-dimensional isentropic flow relations and ideal nozzle performance.
//!
//! Everything here is a pure function of its inputs. Domain violations and
//! solver failures come back as [`FlowError`] values; presenting them is left
//! to the caller.

mod error;
mod gamma;

pub mod area_mach;
pub mod isentropic;
pub mod nozzle;
pub mod regime;

pub use area_mach::{Branch, MachSolver, mach_from_area_ratio};
pub use error::FlowError;
pub use gamma::HeatCapacityRatio;
