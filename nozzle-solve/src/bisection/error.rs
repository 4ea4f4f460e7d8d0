use std::error::Error as StdError;

use thiserror::Error;

use super::BracketError;

/// Errors that can occur during bisection solving or bracket expansion.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bracket [{left}, {right}]")]
    InvalidBracket {
        left: f64,
        right: f64,
        #[source]
        source: BracketError,
    },

    #[error("no root in bracket: f({left})={left_residual}, f({right})={right_residual}")]
    NoBracket {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("no sign change in [{left}, {right}] after {expansions} expansions")]
    ExpansionExhausted {
        left: f64,
        right: f64,
        expansions: usize,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("invalid expansion: {reason}")]
    InvalidExpansion { reason: &'static str },

    #[error("failed to compute residual")]
    Residual(#[source] Box<dyn StdError + Send + Sync>),

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },
}
