//! Core fixture domain types.
//!
//! Defines the immutable inputs the engine receives from the data-ingestion
//! collaborator: per-team statistics snapshots and the match context that
//! owns them. Nothing here is mutated by the engine; each evaluation gets
//! a fresh context.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-outcome values keyed by outcome name.
///
/// Keys follow the three-way market convention (`home_win`, `draw`,
/// `away_win`) but other market keys are accepted; the detector only
/// looks at outcomes present in both the probability and odds maps.
/// `BTreeMap` keeps iteration order deterministic across calls.
pub type OutcomeMap = BTreeMap<String, f64>;

/// Decimal odds quote keyed by outcome name (>= 1.0 by convention).
pub type OddsQuote = OutcomeMap;

/// Outcome key for a home win in a three-way market.
pub const HOME_WIN: &str = "home_win";
/// Outcome key for a draw in a three-way market.
pub const DRAW: &str = "draw";
/// Outcome key for an away win in a three-way market.
pub const AWAY_WIN: &str = "away_win";

/// Snapshot of a team's recent scoring profile.
///
/// All figures are per-match expectations supplied by the ingestion
/// collaborator. Multipliers default to neutral (1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Expected goals scored per match.
    pub goals_scored: f64,
    /// Expected goals conceded per match.
    pub goals_conceded: f64,
    /// Recent-form multiplier in [0, 1].
    pub form: f64,
    /// Home advantage factor (>= 0, only meaningful for the home side).
    #[serde(default = "neutral_factor")]
    pub home_advantage: f64,
    /// Injury impact multiplier in [0, 1]; 1.0 = fully fit squad.
    #[serde(default = "neutral_factor")]
    pub injury_impact: f64,
}

impl TeamStats {
    /// Creates a snapshot with neutral home-advantage and injury factors.
    pub fn new(goals_scored: f64, goals_conceded: f64, form: f64) -> Self {
        Self {
            goals_scored,
            goals_conceded,
            form,
            home_advantage: 1.0,
            injury_impact: 1.0,
        }
    }

    /// Sets the home advantage factor.
    #[must_use]
    pub fn with_home_advantage(mut self, home_advantage: f64) -> Self {
        self.home_advantage = home_advantage;
        self
    }

    /// Sets the injury impact multiplier.
    #[must_use]
    pub fn with_injury_impact(mut self, injury_impact: f64) -> Self {
        self.injury_impact = injury_impact;
        self
    }
}

/// Everything the engine knows about one fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Competition the fixture belongs to.
    pub league: String,
    /// Scheduled kick-off.
    pub match_date: DateTime<Utc>,
    /// Home side statistics snapshot.
    pub home_stats: TeamStats,
    /// Away side statistics snapshot.
    pub away_stats: TeamStats,
    /// Historical head-to-head metrics keyed by metric name.
    #[serde(default)]
    pub head_to_head: BTreeMap<String, f64>,
}

fn neutral_factor() -> f64 {
    1.0
}
