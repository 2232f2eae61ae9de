//! Value bet detection.
//!
//! Compares modeled outcome probabilities against bookmaker decimal odds,
//! keeps the outcomes whose expected value clears the configured threshold,
//! and ranks them best-first with a qualitative confidence label.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::fixture::{OddsQuote, OutcomeMap};

/// Confidence label derived from a signal's expected value.
///
/// Boundaries are strict: an EV of exactly 0.15 is `Medium`, not `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Classifies a retained signal by its expected value.
    pub fn from_expected_value(expected_value: f64) -> Self {
        if expected_value > 0.15 {
            Self::High
        } else if expected_value > 0.08 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A profitable betting opportunity on a single outcome.
///
/// Ephemeral output handed to the notification collaborator; the engine
/// never persists these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBetSignal {
    /// Outcome key (`home_win`, `draw`, `away_win`, ...).
    pub outcome: String,
    /// Modeled probability of the outcome.
    pub probability: f64,
    /// Quoted decimal odds.
    pub odds: f64,
    /// Expected profit per unit stake.
    pub expected_value: f64,
    /// Qualitative confidence label.
    pub confidence: Confidence,
}

/// Expected profit per unit stake at decimal odds.
///
/// `p * (odds - 1) - (1 - p)`: win the net payout with probability `p`,
/// lose the stake otherwise.
pub fn expected_value(probability: f64, odds: f64) -> f64 {
    probability * (odds - 1.0) - (1.0 - probability)
}

/// Detector comparing modeled probabilities against quoted odds.
#[derive(Debug, Clone)]
pub struct ValueDetector {
    /// Minimum expected value for a signal to be retained (strict).
    min_value_threshold: f64,
}

impl ValueDetector {
    /// Creates a detector with the given EV cutoff.
    pub fn new(min_value_threshold: f64) -> Self {
        Self {
            min_value_threshold,
        }
    }

    /// Finds value bets among outcomes present in both maps.
    ///
    /// Returns signals with `expected_value` strictly above the threshold,
    /// sorted descending by expected value (stable on ties).
    ///
    /// # Errors
    /// - [`EngineError::InvalidProbability`] if a probability falls outside
    ///   [0, 1].
    /// - [`EngineError::InvalidOdds`] if a matched quote is at or below
    ///   1.0, or not finite. Malformed quotes are rejected, not skipped.
    pub fn find_value_bets(
        &self,
        probabilities: &OutcomeMap,
        odds: &OddsQuote,
    ) -> Result<Vec<ValueBetSignal>, EngineError> {
        let mut signals = Vec::new();

        for (outcome, &probability) in probabilities {
            let Some(&quote) = odds.get(outcome) else {
                continue;
            };
            if !(0.0..=1.0).contains(&probability) {
                return Err(EngineError::probability(format!(
                    "outcome {outcome} has probability {probability} outside \
                     [0, 1]"
                )));
            }
            // NaN fails the comparison too; a non-finite quote must error,
            // not vanish from the output.
            if !(quote.is_finite() && quote > 1.0) {
                return Err(EngineError::InvalidOdds { odds: quote });
            }

            let ev = expected_value(probability, quote);
            if ev > self.min_value_threshold {
                signals.push(ValueBetSignal {
                    outcome: outcome.clone(),
                    probability,
                    odds: quote,
                    expected_value: ev,
                    confidence: Confidence::from_expected_value(ev),
                });
            }
        }

        // Stable sort keeps tie order deterministic (map iteration order).
        signals.sort_by(|a, b| {
            b.expected_value
                .partial_cmp(&a.expected_value)
                .unwrap_or(Ordering::Equal)
        });

        Ok(signals)
    }
}
