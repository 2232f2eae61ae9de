//! Engine error taxonomy.
//!
//! Every public domain operation validates its inputs at the boundary and
//! rejects invalid values with one of these kinds. Nothing is coerced
//! silently: odds of exactly 1.0 are an error, never bumped to 1.01.
//! Valid extremes (probability 0, lambda 0) are not errors.

use thiserror::Error;

/// Errors produced by the probability, value, and staking components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Decimal odds at or below 1.0 carry no payout above the stake, which
    /// makes the Kelly denominator zero or negative.
    #[error("invalid odds {odds}: decimal odds must be greater than 1.0")]
    InvalidOdds {
        /// The offending quote.
        odds: f64,
    },

    /// A probability (or probability-like fraction) outside its valid range,
    /// or a win/loss pair that does not describe a coherent bet.
    #[error("invalid probability: {reason}")]
    InvalidProbability {
        /// What was out of range.
        reason: String,
    },

    /// The goal model produced rates it cannot renormalize.
    ///
    /// Unreachable for finite, non-negative inputs but guarded so a bad
    /// upstream snapshot surfaces here instead of as NaN downstream.
    #[error("degenerate model: {reason}")]
    DegenerateModel {
        /// Why the model output is unusable.
        reason: String,
    },
}

impl EngineError {
    /// Shorthand used by the validation paths.
    pub(crate) fn probability(reason: impl Into<String>) -> Self {
        Self::InvalidProbability {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateModel {
            reason: reason.into(),
        }
    }
}
