//! Ideal nozzle analysis from the command line.
//!
//! The binary is a thin shell around [`analyze`]: parse [`Args`], run the
//! pipeline, and render the [`Report`] as text or JSON.

mod analysis;
mod args;
mod error;
mod report;

pub use analysis::analyze;
pub use args::{Args, BranchArg};
pub use error::{CliError, failure_message, render_chain};
pub use report::{Report, VelocityReport};
