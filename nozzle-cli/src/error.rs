use std::error::Error as StdError;

use nozzle_flow::FlowError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("failed to render report as JSON")]
    Render(#[from] serde_json::Error),
}

/// Joins an error and its sources into a single `a: b: c` line.
#[must_use]
pub fn render_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Logs a failed run and returns the `warning:` line for stderr.
#[must_use]
pub fn failure_message(err: &CliError) -> String {
    let message = render_chain(err);
    warn!(error = %message, "analysis failed");
    format!("warning: {message}")
}
