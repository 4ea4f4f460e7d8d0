use std::error::Error as StdError;

/// A scalar equation `f(x) = 0`.
///
/// Closures of the form `Fn(f64) -> Result<f64, E>` implement this trait,
/// so simple equations don't need a dedicated type.
pub trait Equation {
    type Error: StdError + Send + Sync + 'static;

    /// Evaluates the residual `f(x)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the residual cannot be computed at `x`.
    fn residual(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<F, E> Equation for F
where
    F: Fn(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn residual(&self, x: f64) -> Result<f64, Self::Error> {
        self(x)
    }
}

/// A residual evaluated at a given `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub x: f64,
    pub residual: f64,
}
