use nozzle_solve::bisection;
use thiserror::Error;

/// Errors that may occur when evaluating flow relations.
#[derive(Debug, Error)]
pub enum FlowError {
    /// An input lies outside the physical domain of the relation.
    #[error("invalid input: {name} = {value} ({requirement})")]
    InvalidInput {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// An iterative inversion failed to reach its tolerance.
    ///
    /// Covers bracket expansion that never encloses the root as well as
    /// bisection that exhausts its iteration budget.
    #[error("did not converge: {context}")]
    NonConvergence {
        context: String,
        #[source]
        source: Option<bisection::Error>,
    },
}

impl FlowError {
    pub(crate) fn invalid_input(name: &'static str, value: f64, requirement: &'static str) -> Self {
        Self::InvalidInput {
            name,
            value,
            requirement,
        }
    }

    pub(crate) fn non_convergence(
        context: impl Into<String>,
        source: Option<bisection::Error>,
    ) -> Self {
        Self::NonConvergence {
            context: context.into(),
            source,
        }
    }

    /// Returns true for errors caused by out-of-domain inputs.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
