//! Match Advisor - Probability, Value, and Staking Pipeline
//!
//! The advisory use case that:
//! 1. Estimates outcome probabilities from the match context
//! 2. Detects value against the bookmaker's quotes
//! 3. Sizes a fractional-Kelly stake per retained signal
//!
//! Stateless between calls: the caller supplies context, odds, and the
//! current bankroll on every invocation, so any number of matches can be
//! evaluated concurrently. A signal that fails sizing is skipped with a
//! warning rather than aborting the remaining signals for the match.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::domain::error::EngineError;
use crate::domain::fixture::{MatchContext, OddsQuote};
use crate::domain::kelly::{KellyParameters, StakeRecommendation, StakeSizer};
use crate::domain::poisson::ProbabilityModel;
use crate::domain::value::{ValueBetSignal, ValueDetector};

/// One fully sized recommendation for the notification collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetAdvice {
    /// The underlying value signal.
    pub signal: ValueBetSignal,
    /// Stake and applied Kelly fraction.
    pub stake: StakeRecommendation,
    /// Expected percentage return on the wagered fraction.
    pub expected_roi: f64,
}

/// Advisory pipeline composing the three domain components.
#[derive(Debug, Clone)]
pub struct MatchAdvisor {
    /// Poisson outcome probability model.
    model: ProbabilityModel,
    /// Expected-value detector.
    detector: ValueDetector,
    /// Kelly stake sizer.
    sizer: StakeSizer,
    /// Risk factor applied to every sized signal.
    risk_factor: f64,
}

impl MatchAdvisor {
    /// Creates an advisor from explicit components.
    pub fn new(
        model: ProbabilityModel,
        detector: ValueDetector,
        sizer: StakeSizer,
        risk_factor: f64,
    ) -> Self {
        Self {
            model,
            detector,
            sizer,
            risk_factor,
        }
    }

    /// Creates an advisor wired from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            ProbabilityModel::new(config.advisor.max_goals),
            ValueDetector::new(config.advisor.min_value_threshold),
            StakeSizer::new(
                config.staking.min_stake,
                config.staking.max_stake_percentage,
            ),
            config.staking.risk_factor,
        )
    }

    /// Evaluates one fixture and returns sized advice, best value first.
    ///
    /// # Errors
    /// Propagates [`EngineError`] from probability estimation or value
    /// detection; those invalidate the whole match. Per-signal sizing
    /// failures only drop the affected signal.
    #[instrument(
        skip(self, context, odds),
        fields(home = %context.home_team, away = %context.away_team)
    )]
    pub fn advise(
        &self,
        context: &MatchContext,
        odds: &OddsQuote,
        bankroll: f64,
    ) -> Result<Vec<BetAdvice>, EngineError> {
        let probabilities = self.model.estimate(context)?;
        debug!(
            home_win = probabilities.home_win,
            draw = probabilities.draw,
            away_win = probabilities.away_win,
            "Estimated outcome probabilities"
        );

        let signals = self.detector.find_value_bets(&probabilities.as_map(), odds)?;

        let mut advice = Vec::with_capacity(signals.len());
        for signal in signals {
            let params = KellyParameters::new(signal.probability, signal.odds)
                .with_risk_factor(self.risk_factor);

            let stake = match self.sizer.optimal_stake(bankroll, &params) {
                Ok(stake) => stake,
                Err(err) => {
                    warn!(outcome = %signal.outcome, %err, "Skipping unsizable signal");
                    continue;
                }
            };
            let expected_roi = match StakeSizer::expected_roi(
                signal.probability,
                signal.odds,
                stake.kelly_fraction,
            ) {
                Ok(roi) => roi,
                Err(err) => {
                    warn!(outcome = %signal.outcome, %err, "Skipping signal without ROI");
                    continue;
                }
            };

            advice.push(BetAdvice {
                signal,
                stake,
                expected_roi,
            });
        }

        info!(recommendations = advice.len(), "Produced stake advice");
        Ok(advice)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use crate::domain::fixture::TeamStats;

    fn sample_context() -> MatchContext {
        MatchContext {
            home_team: "Sporting".to_string(),
            away_team: "Braga".to_string(),
            league: "Primeira Liga".to_string(),
            match_date: Utc::now(),
            home_stats: TeamStats::new(2.1, 0.9, 0.95).with_home_advantage(1.1),
            away_stats: TeamStats::new(1.0, 1.5, 0.7),
            head_to_head: BTreeMap::new(),
        }
    }

    fn generous_odds() -> OddsQuote {
        let mut odds = BTreeMap::new();
        odds.insert("home_win".to_string(), 2.1);
        odds.insert("draw".to_string(), 3.9);
        odds.insert("away_win".to_string(), 5.5);
        odds
    }

    #[test]
    fn test_advice_is_sized_and_ranked() {
        let advisor = MatchAdvisor::from_config(&AppConfig::default());
        let advice = advisor
            .advise(&sample_context(), &generous_odds(), 1000.0)
            .unwrap();

        assert!(!advice.is_empty());
        for pair in advice.windows(2) {
            assert!(
                pair[0].signal.expected_value >= pair[1].signal.expected_value
            );
        }
        for item in &advice {
            assert!(item.stake.stake <= 1000.0 * 0.05 + 0.005);
            assert!(item.stake.kelly_fraction >= 0.0);
        }
    }

    #[test]
    fn test_bad_quote_invalidates_match() {
        let advisor = MatchAdvisor::from_config(&AppConfig::default());
        let mut odds = generous_odds();
        odds.insert("home_win".to_string(), 1.0);

        let err = advisor
            .advise(&sample_context(), &odds, 1000.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidOdds { .. }));
    }

    #[test]
    fn test_short_odds_produce_no_advice() {
        let advisor = MatchAdvisor::from_config(&AppConfig::default());
        let mut odds = BTreeMap::new();
        // Quotes far below fair value: every EV is negative.
        odds.insert("home_win".to_string(), 1.05);
        odds.insert("draw".to_string(), 1.1);
        odds.insert("away_win".to_string(), 1.2);

        let advice = advisor
            .advise(&sample_context(), &odds, 1000.0)
            .unwrap();
        assert!(advice.is_empty());
    }
}
