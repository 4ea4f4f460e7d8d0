//! Bisection root finding on a sign-changing bracket.
//!
//! [`solve`] halves a bracket `[left, right]` whose endpoint residuals have
//! opposite signs until the bracket or the residual is within tolerance.
//! When only a lower bound is known, [`expand_right`] grows the bracket
//! geometrically until it straddles a root.
//!
//! [`Config::scale_free`] selects a log-space split with a relative-only
//! stopping rule, for roots whose magnitude is not known in advance.

mod bracket;
mod config;
mod error;
mod expand;
mod solution;

pub use bracket::{Bracket, BracketError};
pub use config::{Config, Midpoint};
pub use error::Error;
pub use expand::{Expansion, expand_right};
pub use solution::{Solution, Status};

use crate::{Equation, Evaluation, Observer};

/// Control actions supported by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop iterating and return the best estimate so far.
    StopEarly,
}

/// Iteration event emitted by the bisection solver.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration counter (1-based within the bisection loop).
    pub iter: usize,
    /// Bracket that was halved to produce this evaluation.
    pub bracket: &'a Bracket,
    /// Evaluation at the bracket midpoint.
    pub eval: Evaluation,
}

/// Finds a root of `equation` inside `bracket` using the bisection method.
///
/// The bracket may be given in either order. Iteration stops on the rule
/// described by [`Config`]. Hitting `max_iters` is not an error; the
/// returned [`Solution`] carries [`Status::MaxIters`] and the best estimate
/// seen, and callers decide whether that is acceptable.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, the endpoint
/// residuals do not change sign, or the equation fails or returns a
/// non-finite residual.
pub fn solve<E, Obs>(
    equation: &E,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    E: Equation,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let [left, right] =
        bracket::ordered(bracket, config.midpoint).map_err(|source| Error::InvalidBracket {
            left: bracket[0],
            right: bracket[1],
            source,
        })?;

    let left_eval = evaluate(equation, left)?;
    if left_eval.residual.abs() <= config.residual_tol {
        return Ok(Solution::new(left_eval, Status::Converged, 0));
    }

    let right_eval = evaluate(equation, right)?;
    if right_eval.residual.abs() <= config.residual_tol {
        return Ok(Solution::new(right_eval, Status::Converged, 0));
    }

    let mut bracket =
        Bracket::new(left_eval, right_eval, config.midpoint).ok_or(Error::NoBracket {
            left,
            right,
            left_residual: left_eval.residual,
            right_residual: right_eval.residual,
        })?;
    let mut best = bracket.best_endpoint();

    for iter in 1..=config.max_iters {
        let mid = bracket.midpoint();
        if !bracket.splits_at(mid) {
            // Endpoints are adjacent floats.
            return Ok(Solution::new(best, Status::Converged, iter - 1));
        }

        let eval = evaluate(equation, mid)?;

        let x_converged = bracket.is_x_converged(config.x_abs_tol, config.x_rel_tol);
        let residual_converged = eval.residual.abs() <= config.residual_tol;

        if eval.residual.abs() < best.residual.abs() {
            best = eval;
        }

        let event = Event {
            iter,
            bracket: &bracket,
            eval,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(best, Status::StoppedByObserver, iter));
        }

        if x_converged || residual_converged {
            return Ok(Solution::new(eval, Status::Converged, iter));
        }

        bracket.shrink(eval);
    }

    Ok(Solution::new(best, Status::MaxIters, config.max_iters))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<E: Equation>(
    equation: &E,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution, Error> {
    solve(equation, bracket, config, ())
}

/// Evaluates the equation and rejects non-finite residuals.
fn evaluate<E: Equation>(equation: &E, x: f64) -> Result<Evaluation, Error> {
    let residual = equation
        .residual(x)
        .map_err(|err| Error::Residual(Box::new(err)))?;

    if !residual.is_finite() {
        return Err(Error::NonFiniteResidual { x, residual });
    }

    Ok(Evaluation { x, residual })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    /// Residual is `x^2 - target`.
    struct SquareEquals(f64);
    impl Equation for SquareEquals {
        type Error = Infallible;

        fn residual(&self, x: f64) -> Result<f64, Self::Error> {
            Ok(x * x - self.0)
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("undefined at x = {0}")]
    struct Undefined(f64);

    #[test]
    fn finds_square_root() {
        let solution = solve_unobserved(&SquareEquals(9.0), [0.0, 10.0], &Config::default())
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
        assert!(solution.residual.abs() < 1e-9);
    }

    #[test]
    fn closures_are_equations() {
        let cube_root_of_27 = |x: f64| Ok::<_, Infallible>(x * x * x - 27.0);

        let solution = solve_unobserved(&cube_root_of_27, [0.0, 10.0], &Config::default())
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn decreasing_function_is_handled() {
        let decreasing = |x: f64| Ok::<_, Infallible>(1.0 / x - 4.0);

        let solution = solve_unobserved(&decreasing, [0.01, 1.0], &Config::default())
            .expect("should solve");

        assert_relative_eq!(solution.x, 0.25, epsilon = 1e-10);
    }

    #[test]
    fn endpoint_root_returns_without_iterating() {
        let solution = solve_unobserved(&SquareEquals(4.0), [2.0, 5.0], &Config::default())
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.x, 2.0);
    }

    #[test]
    fn normalizes_reversed_bracket() {
        let solution = solve_unobserved(&SquareEquals(36.0), [10.0, 0.0], &Config::default())
            .expect("should solve with reversed bracket");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 6.0, epsilon = 1e-10);
    }

    #[test]
    fn observer_sees_every_iteration_and_can_stop() {
        let mut widths = Vec::new();
        let observer = |event: &Event<'_>| {
            widths.push(event.bracket.width());
            (event.iter >= 3).then_some(Action::StopEarly)
        };

        let solution = solve(&SquareEquals(9.0), [0.0, 10.0], &Config::default(), observer)
            .expect("should stop cleanly");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 3);
        assert_eq!(widths.len(), 3);
        assert_relative_eq!(widths[0], 10.0);
        assert_relative_eq!(widths[1], 5.0);
        assert_relative_eq!(widths[2], 2.5);
    }

    #[test]
    fn max_iters_returns_best_estimate() {
        let config = Config {
            max_iters: 0,
            ..Config::default()
        };

        let solution = solve_unobserved(&SquareEquals(9.0), [2.0, 10.0], &config)
            .expect("should return best endpoint");

        // |4 - 9| = 5 beats |100 - 9| = 91.
        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.x, 2.0);
    }

    #[test]
    fn errors_on_invalid_bracket() {
        let result = solve_unobserved(&SquareEquals(25.0), [5.0, 5.0], &Config::default());
        assert!(matches!(
            result,
            Err(Error::InvalidBracket {
                source: BracketError::ZeroWidth,
                ..
            })
        ));

        let result = solve_unobserved(&SquareEquals(25.0), [f64::NAN, 5.0], &Config::default());
        assert!(matches!(
            result,
            Err(Error::InvalidBracket {
                source: BracketError::NonFinite,
                ..
            })
        ));
    }

    #[test]
    fn errors_on_no_sign_change() {
        let result = solve_unobserved(&SquareEquals(9.0), [5.0, 10.0], &Config::default());
        assert!(matches!(result, Err(Error::NoBracket { .. })));
    }

    #[test]
    fn errors_on_invalid_config() {
        let config = Config {
            x_abs_tol: -1.0,
            ..Config::default()
        };
        let result = solve_unobserved(&SquareEquals(4.0), [0.0, 10.0], &config);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn equation_errors_are_wrapped() {
        let failing = |x: f64| {
            if x > 1.0 {
                Err(Undefined(x))
            } else {
                Ok(x - 2.0)
            }
        };

        let err = solve_unobserved(&failing, [0.0, 4.0], &Config::default()).unwrap_err();
        match err {
            Error::Residual(source) => assert_eq!(source.to_string(), "undefined at x = 4"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_residual_is_an_error() {
        let blows_up = |x: f64| Ok::<_, Infallible>(1.0 / x);

        let result = solve_unobserved(&blows_up, [0.0, 1.0], &Config::default());
        assert!(matches!(result, Err(Error::NonFiniteResidual { .. })));
    }

    #[test]
    fn scale_free_config_resolves_tiny_roots() {
        // Root at 1e-9 inside [1e-300, 1].
        let reciprocal = |x: f64| Ok::<_, Infallible>(1e9_f64.ln() + x.ln());
        let config = Config::scale_free(4.0 * f64::EPSILON);

        let solution =
            solve_unobserved(&reciprocal, [1e-300, 1.0], &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 1e-9, max_relative = 1e-13);
        assert!(solution.iters < 100, "took {} iterations", solution.iters);
    }

    #[test]
    fn zero_tolerances_stop_at_float_resolution() {
        let config = Config {
            x_abs_tol: 0.0,
            x_rel_tol: 0.0,
            residual_tol: 0.0,
            ..Config::default()
        };

        let solution = solve_unobserved(&SquareEquals(2.0), [0.0, 2.0], &config)
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 2.0_f64.sqrt(), max_relative = 4.0 * f64::EPSILON);
    }

    #[test]
    fn geometric_split_rejects_non_positive_bracket() {
        let config = Config::scale_free(1e-12);
        let result = solve_unobserved(&SquareEquals(4.0), [0.0, 10.0], &config);
        assert!(matches!(
            result,
            Err(Error::InvalidBracket {
                source: BracketError::NotPositive,
                ..
            })
        ));
    }
}
