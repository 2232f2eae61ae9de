//! Kelly Criterion stake sizing.
//!
//! Implements fractional Kelly for bankroll management. Half-Kelly (0.5x)
//! is the default risk factor, which cuts variance substantially while
//! retaining most of the growth rate.
//!
//! All formulas are pure and independently callable; the only ordering is
//! the data dependency that a fraction must exist before a stake or an ROI
//! can be derived from it.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Default fraction of full Kelly to apply (half-Kelly).
pub const DEFAULT_RISK_FACTOR: f64 = 0.5;

/// Tolerance for an explicitly supplied win/loss probability pair.
///
/// The pair does not have to sum to exactly 1 (push/refund markets leave a
/// gap), but a sum this far off describes no coherent bet.
const PROB_SUM_TOLERANCE: f64 = 0.1;

/// Inputs for one Kelly calculation.
///
/// `loss_probability` is optional; when absent it is derived as
/// `1 - win_probability` inside the resolution step. The caller's value is
/// never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KellyParameters {
    /// Modeled probability of the bet winning, in [0, 1].
    pub win_probability: f64,
    /// Quoted decimal odds (> 1.0).
    pub odds: f64,
    /// Probability of losing the stake; defaults to `1 - win_probability`.
    #[serde(default)]
    pub loss_probability: Option<f64>,
    /// Fraction of full Kelly to apply, in (0, 1].
    #[serde(default = "default_risk_factor")]
    pub risk_factor: f64,
}

impl KellyParameters {
    /// Creates half-Kelly parameters with a derived loss probability.
    pub fn new(win_probability: f64, odds: f64) -> Self {
        Self {
            win_probability,
            odds,
            loss_probability: None,
            risk_factor: DEFAULT_RISK_FACTOR,
        }
    }

    /// Supplies an explicit loss probability (push/refund markets).
    #[must_use]
    pub fn with_loss_probability(mut self, loss_probability: f64) -> Self {
        self.loss_probability = Some(loss_probability);
        self
    }

    /// Overrides the Kelly risk factor.
    #[must_use]
    pub fn with_risk_factor(mut self, risk_factor: f64) -> Self {
        self.risk_factor = risk_factor;
        self
    }
}

/// Stake advice for one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeRecommendation {
    /// Stake in currency units, rounded to cents.
    pub stake: f64,
    /// Risk-scaled Kelly fraction actually applied, in [0, 1].
    pub kelly_fraction: f64,
}

/// Fully validated, resolved parameter snapshot consumed by the formulas.
struct ResolvedKelly {
    /// Win probability.
    p: f64,
    /// Loss probability (derived when not supplied).
    q: f64,
    /// Net odds: payout above the returned stake.
    b: f64,
    /// Kelly risk factor.
    risk_factor: f64,
}

/// Validates parameters and derives the loss probability once.
fn resolve(params: &KellyParameters) -> Result<ResolvedKelly, EngineError> {
    // NaN fails the comparison too, so non-finite odds cannot slip through.
    if !(params.odds.is_finite() && params.odds > 1.0) {
        return Err(EngineError::InvalidOdds { odds: params.odds });
    }
    let p = params.win_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(EngineError::probability(format!(
            "win_probability {p} outside [0, 1]"
        )));
    }
    if !(params.risk_factor > 0.0 && params.risk_factor <= 1.0) {
        return Err(EngineError::probability(format!(
            "risk_factor {} outside (0, 1]",
            params.risk_factor
        )));
    }

    let q = match params.loss_probability {
        Some(q) => {
            if !(0.0..=1.0).contains(&q) {
                return Err(EngineError::probability(format!(
                    "loss_probability {q} outside [0, 1]"
                )));
            }
            if (p + q - 1.0).abs() > PROB_SUM_TOLERANCE {
                return Err(EngineError::probability(format!(
                    "win/loss probabilities sum to {}, expected ~1",
                    p + q
                )));
            }
            q
        }
        None => 1.0 - p,
    };

    Ok(ResolvedKelly {
        p,
        q,
        b: params.odds - 1.0,
        risk_factor: params.risk_factor,
    })
}

/// Stake calculator applying the bankroll policy knobs.
///
/// The Kelly formulas themselves are associated functions; only the stake
/// floor and cap live on the struct.
#[derive(Debug, Clone)]
pub struct StakeSizer {
    /// Minimum stake in currency units (advisory, see `optimal_stake`).
    min_stake: f64,
    /// Maximum stake as a fraction of bankroll.
    max_stake_percentage: f64,
}

impl StakeSizer {
    /// Creates a sizer with the given stake floor and bankroll cap.
    pub fn new(min_stake: f64, max_stake_percentage: f64) -> Self {
        Self {
            min_stake,
            max_stake_percentage,
        }
    }

    /// Computes the risk-scaled Kelly fraction, clamped to [0, 1].
    ///
    /// Formula: `f = (b * p - q) / b`, scaled by the risk factor. A
    /// negative-edge bet clamps to 0 rather than erroring.
    ///
    /// # Errors
    /// [`EngineError::InvalidOdds`] unless `odds` is finite and above 1.0
    /// (the net odds `b` would be zero, negative, or not a number),
    /// [`EngineError::InvalidProbability`] for out-of-range probabilities
    /// or risk factor.
    pub fn kelly_fraction(params: &KellyParameters) -> Result<f64, EngineError> {
        let k = resolve(params)?;
        let full_kelly = (k.b * k.p - k.q) / k.b;
        Ok((full_kelly * k.risk_factor).clamp(0.0, 1.0))
    }

    /// Expected profit per unit stake: `p * (odds - 1) - q`.
    ///
    /// # Errors
    /// Same validation as [`Self::kelly_fraction`].
    pub fn expected_value(params: &KellyParameters) -> Result<f64, EngineError> {
        let k = resolve(params)?;
        Ok(k.p * k.b - k.q)
    }

    /// Expected percentage return on bankroll for a bet sized at the given
    /// Kelly fraction: `((p * (odds - 1) * f) - (1 - p) * f) * 100`.
    ///
    /// # Errors
    /// [`EngineError::InvalidOdds`] unless `odds` is finite and above 1.0,
    /// [`EngineError::InvalidProbability`] when the probability or the
    /// fraction fall outside [0, 1].
    pub fn expected_roi(
        win_probability: f64,
        odds: f64,
        kelly_fraction: f64,
    ) -> Result<f64, EngineError> {
        if !(odds.is_finite() && odds > 1.0) {
            return Err(EngineError::InvalidOdds { odds });
        }
        if !(0.0..=1.0).contains(&win_probability) {
            return Err(EngineError::probability(format!(
                "win_probability {win_probability} outside [0, 1]"
            )));
        }
        if !(0.0..=1.0).contains(&kelly_fraction) {
            return Err(EngineError::probability(format!(
                "kelly_fraction {kelly_fraction} outside [0, 1]"
            )));
        }

        let expected_return = win_probability * (odds - 1.0) * kelly_fraction
            - (1.0 - win_probability) * kelly_fraction;
        Ok(expected_return * 100.0)
    }

    /// Sizes a stake from the bankroll and the Kelly fraction.
    ///
    /// The raw stake is floored at `min_stake` first, then capped at
    /// `bankroll * max_stake_percentage`. The order matters: when the cap
    /// sits below the floor the cap wins, so the minimum stake is advisory
    /// rather than guaranteed.
    ///
    /// # Errors
    /// Same validation as [`Self::kelly_fraction`].
    pub fn optimal_stake(
        &self,
        bankroll: f64,
        params: &KellyParameters,
    ) -> Result<StakeRecommendation, EngineError> {
        let kelly_fraction = Self::kelly_fraction(params)?;

        let raw = bankroll * kelly_fraction;
        let floored = raw.max(self.min_stake);
        let capped = floored.min(bankroll * self.max_stake_percentage);

        Ok(StakeRecommendation {
            stake: round_currency(capped),
            kelly_fraction,
        })
    }
}

/// Rounds a currency amount to cents.
fn round_currency(amount: f64) -> f64 {
    Decimal::from_f64(amount)
        .map_or(amount, |d| d.round_dp(2).to_f64().unwrap_or(amount))
}

fn default_risk_factor() -> f64 {
    DEFAULT_RISK_FACTOR
}
