use crate::Equation;

use super::{
    Error, Midpoint,
    bracket::{ordered, same_side},
    evaluate,
};

/// Geometric growth policy for [`expand_right`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expansion {
    /// Factor applied to the bracket width on each expansion.
    pub factor: f64,
    /// Number of expansions attempted before giving up.
    pub max_expansions: usize,
}

impl Default for Expansion {
    fn default() -> Self {
        Self {
            factor: 2.0,
            max_expansions: 20,
        }
    }
}

impl Expansion {
    /// Validates that the growth factor is finite and greater than one.
    ///
    /// # Errors
    ///
    /// Returns the reason if the factor cannot grow the bracket.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.factor.is_finite() || self.factor <= 1.0 {
            return Err("factor must be finite and greater than one");
        }
        Ok(())
    }
}

/// Grows the right end of `bracket` until it straddles a sign change.
///
/// The left bound stays fixed and the width is multiplied by
/// `expansion.factor` each time the right residual has the same sign as the
/// left one. Returns the first `[left, right]` with opposite signs, which can
/// be passed straight to [`solve`](super::solve).
///
/// # Errors
///
/// Returns [`Error::ExpansionExhausted`] if no sign change is found within
/// `max_expansions`, or an error if the bracket or expansion is invalid or
/// the equation fails.
pub fn expand_right<E: Equation>(
    equation: &E,
    bracket: [f64; 2],
    expansion: &Expansion,
) -> Result<[f64; 2], Error> {
    expansion
        .validate()
        .map_err(|reason| Error::InvalidExpansion { reason })?;

    let [left, mut right] =
        ordered(bracket, Midpoint::Arithmetic).map_err(|source| Error::InvalidBracket {
            left: bracket[0],
            right: bracket[1],
            source,
        })?;

    let left_residual = evaluate(equation, left)?.residual;

    for expansions in 0..=expansion.max_expansions {
        let right_eval = evaluate(equation, right)?;
        #[allow(clippy::float_cmp)]
        if !same_side(right_eval.residual, left_residual) || right_eval.residual == 0.0 {
            return Ok([left, right]);
        }

        if expansions == expansion.max_expansions {
            break;
        }

        let grown = left + (right - left) * expansion.factor;
        if !grown.is_finite() {
            break;
        }
        right = grown;
    }

    Err(Error::ExpansionExhausted {
        left,
        right,
        expansions: expansion.max_expansions,
    })
}
