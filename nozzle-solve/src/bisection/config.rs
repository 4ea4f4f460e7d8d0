/// Where each iteration splits the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Midpoint {
    /// `(left + right) / 2`.
    #[default]
    Arithmetic,
    /// `sqrt(left · right)`.
    ///
    /// Requires a strictly positive bracket. Suits roots that may sit many
    /// decades below the upper bound, such as Mach numbers near zero.
    Geometric,
}

/// Stopping rule and split strategy for the bisection solver.
///
/// Iteration stops when the bracket width is at most
/// `x_abs_tol + x_rel_tol · |mid|`, when a midpoint residual is within
/// `residual_tol`, or when the bracket endpoints are adjacent floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
    pub midpoint: Midpoint,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
            midpoint: Midpoint::Arithmetic,
        }
    }
}

impl Config {
    /// Relative-only stopping rule with geometric splitting.
    ///
    /// The absolute and residual tests are disabled, so the accepted root
    /// has the same relative precision whether it is `1e-9` or `1e3`.
    /// Splitting in log space keeps the iteration count near
    /// `log2(ln(right/left) / x_rel_tol)` for any positive bracket.
    #[must_use]
    pub fn scale_free(x_rel_tol: f64) -> Self {
        Self {
            x_abs_tol: 0.0,
            x_rel_tol,
            residual_tol: 0.0,
            midpoint: Midpoint::Geometric,
            ..Self::default()
        }
    }

    /// Validates that all tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns the reason naming the first offending tolerance.
    pub fn validate(&self) -> Result<(), &'static str> {
        let tolerances = [
            (self.x_abs_tol, "x_abs_tol must be finite and non-negative"),
            (self.x_rel_tol, "x_rel_tol must be finite and non-negative"),
            (self.residual_tol, "residual_tol must be finite and non-negative"),
        ];

        match tolerances
            .into_iter()
            .find(|(tol, _)| !tol.is_finite() || *tol < 0.0)
        {
            Some((_, reason)) => Err(reason),
            None => Ok(()),
        }
    }
}
