use thiserror::Error;

use crate::Evaluation;

use super::Midpoint;

/// Reasons a pair of endpoints cannot be bisected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("endpoints must be finite")]
    NonFinite,
    #[error("endpoints coincide")]
    ZeroWidth,
    #[error("geometric splitting needs both endpoints above zero")]
    NotPositive,
}

/// Checks that `bracket` can be split with `midpoint` and orders it.
///
/// # Errors
///
/// Returns a [`BracketError`] if an endpoint is non-finite, the endpoints
/// coincide, or a geometric split is requested on a non-positive endpoint.
pub(super) fn ordered(bracket: [f64; 2], midpoint: Midpoint) -> Result<[f64; 2], BracketError> {
    let [a, b] = bracket;

    if !a.is_finite() || !b.is_finite() {
        return Err(BracketError::NonFinite);
    }

    #[allow(clippy::float_cmp)]
    if a == b {
        return Err(BracketError::ZeroWidth);
    }

    if midpoint == Midpoint::Geometric && (a <= 0.0 || b <= 0.0) {
        return Err(BracketError::NotPositive);
    }

    Ok(if a < b { [a, b] } else { [b, a] })
}

/// Returns true if both residuals fall on the same side of zero.
///
/// Zero counts as positive.
pub(super) fn same_side(a: f64, b: f64) -> bool {
    (a < 0.0) == (b < 0.0)
}

/// Two evaluated endpoints whose residuals straddle zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: Evaluation,
    right: Evaluation,
    midpoint: Midpoint,
}

impl Bracket {
    /// Pairs two ordered endpoint evaluations, or `None` if their residuals
    /// share a sign.
    pub(super) fn new(left: Evaluation, right: Evaluation, midpoint: Midpoint) -> Option<Self> {
        (!same_side(left.residual, right.residual)).then_some(Self {
            left,
            right,
            midpoint,
        })
    }

    #[must_use]
    pub fn left(&self) -> Evaluation {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> Evaluation {
        self.right
    }

    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left.x, self.right.x]
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right.x - self.left.x
    }

    /// Next point to evaluate.
    ///
    /// The geometric split halves `ln(right / left)`, so a bracket spanning
    /// many decades shrinks in relative terms at a constant rate.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        match self.midpoint {
            Midpoint::Arithmetic => 0.5 * (self.left.x + self.right.x),
            Midpoint::Geometric => self.left.x.sqrt() * self.right.x.sqrt(),
        }
    }

    /// Returns true if the width is within `x_abs_tol + x_rel_tol * |mid|`.
    #[must_use]
    pub fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        self.width() <= x_abs_tol + x_rel_tol * self.midpoint().abs()
    }

    /// Returns true if `x` lies strictly between the endpoints.
    ///
    /// Fails once the endpoints are adjacent floats, when no split can make
    /// progress.
    pub(super) fn splits_at(&self, x: f64) -> bool {
        self.left.x < x && x < self.right.x
    }

    /// Endpoint with the smaller residual magnitude.
    pub(super) fn best_endpoint(&self) -> Evaluation {
        if self.left.residual.abs() <= self.right.residual.abs() {
            self.left
        } else {
            self.right
        }
    }

    /// Replaces the endpoint on the same side of zero as `eval`.
    pub(super) fn shrink(&mut self, eval: Evaluation) {
        if same_side(eval.residual, self.left.residual) {
            self.left = eval;
        } else {
            self.right = eval;
        }
    }
}
