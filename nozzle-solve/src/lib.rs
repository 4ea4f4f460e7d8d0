//! Bracketed root finding for the nozzle flow toolkit.
//!
//! The solvers here work on scalar [`Equation`]s and report progress to an
//! [`Observer`], which lets callers log or stop an iteration without the
//! solver knowing how results are presented.

mod equation;
mod observe;

pub mod bisection;

pub use equation::{Equation, Evaluation};
pub use observe::Observer;
