//! Poisson goal model for three-way match outcome probabilities.
//!
//! Each side's goal count is modeled as an independent Poisson variable
//! whose rate is the team's expected goals adjusted by home advantage,
//! recent form, and injury impact. Outcome probabilities come from summing
//! the joint mass over a truncated scoreline grid and renormalizing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::fixture::{AWAY_WIN, DRAW, HOME_WIN, MatchContext, OutcomeMap};

/// Default scoreline grid cutoff (goals 0..=10 per side).
///
/// For realistic rates (lambda <= ~6) the truncated tail mass is far below
/// the renormalization tolerance, and the grid keeps every call O(1).
pub const DEFAULT_MAX_GOALS: u32 = 10;

/// Normalized three-way outcome probabilities, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchProbabilities {
    /// P(home goals > away goals).
    pub home_win: f64,
    /// P(home goals == away goals).
    pub draw: f64,
    /// P(home goals < away goals).
    pub away_win: f64,
}

impl MatchProbabilities {
    /// Bridges to the keyed map form consumed by the value detector.
    pub fn as_map(&self) -> OutcomeMap {
        let mut map = BTreeMap::new();
        map.insert(HOME_WIN.to_string(), self.home_win);
        map.insert(DRAW.to_string(), self.draw);
        map.insert(AWAY_WIN.to_string(), self.away_win);
        map
    }
}

/// Poisson outcome probability model.
///
/// Stateless apart from the grid cutoff; safe to share across threads.
#[derive(Debug, Clone)]
pub struct ProbabilityModel {
    /// Maximum goals per side in the scoreline grid.
    max_goals: u32,
}

impl ProbabilityModel {
    /// Creates a model with a custom scoreline grid cutoff.
    pub fn new(max_goals: u32) -> Self {
        Self { max_goals }
    }

    /// Estimates home-win / draw / away-win probabilities for a fixture.
    ///
    /// # Errors
    /// Returns [`EngineError::DegenerateModel`] if the adjusted goal rates
    /// are negative or non-finite, or if the grid mass cannot be
    /// renormalized. A zero rate is valid: P(0 goals) = 1.
    pub fn estimate(
        &self,
        context: &MatchContext,
    ) -> Result<MatchProbabilities, EngineError> {
        let home = &context.home_stats;
        let away = &context.away_stats;

        let lambda_home = home.goals_scored
            * home.home_advantage
            * home.form
            * home.injury_impact;
        let lambda_away = away.goals_scored * away.form * away.injury_impact;

        for (side, lambda) in [("home", lambda_home), ("away", lambda_away)] {
            if !lambda.is_finite() || lambda < 0.0 {
                return Err(EngineError::degenerate(format!(
                    "{side} goal rate {lambda} is not a finite non-negative \
                     number"
                )));
            }
        }

        let pmf_home = poisson_pmf(lambda_home, self.max_goals);
        let pmf_away = poisson_pmf(lambda_away, self.max_goals);

        // The three disjoint regions of the scoreline grid. The truncated
        // tail means the raw sums fall short of 1, so renormalize below.
        let mut home_win = 0.0;
        let mut draw = 0.0;
        let mut away_win = 0.0;
        for (i, p_i) in pmf_home.iter().enumerate() {
            for (j, p_j) in pmf_away.iter().enumerate() {
                let mass = p_i * p_j;
                if i > j {
                    home_win += mass;
                } else if i < j {
                    away_win += mass;
                } else {
                    draw += mass;
                }
            }
        }

        let total = home_win + draw + away_win;
        if total <= 0.0 || !total.is_finite() {
            return Err(EngineError::degenerate(format!(
                "scoreline grid mass {total} cannot be renormalized"
            )));
        }

        Ok(MatchProbabilities {
            home_win: home_win / total,
            draw: draw / total,
            away_win: away_win / total,
        })
    }
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_GOALS)
    }
}

/// Poisson pmf table for k = 0..=max_k at the given rate.
///
/// Built with the multiplicative recurrence so no factorials or powers are
/// evaluated. Truncated: the caller renormalizes over the grid.
fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let mut pmf = vec![0.0; max_k as usize + 1];
    pmf[0] = (-lambda).exp();
    for k in 1..=max_k as usize {
        pmf[k] = pmf[k - 1] * lambda / k as f64;
    }
    pmf
}
