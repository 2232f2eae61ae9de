//! Integration Tests - End-to-end Advisory Pipeline
//!
//! Exercises the full flow the surrounding application drives: build a
//! match context, estimate probabilities, detect value against quotes,
//! and size stakes from configuration-driven policy.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use football_value_engine::config::AppConfig;
use football_value_engine::config::loader::validate_config;
use football_value_engine::domain::fixture::{MatchContext, OddsQuote, TeamStats};
use football_value_engine::domain::kelly::{KellyParameters, StakeSizer};
use football_value_engine::domain::poisson::ProbabilityModel;
use football_value_engine::domain::value::{Confidence, ValueDetector};
use football_value_engine::usecases::MatchAdvisor;

fn derby_context() -> MatchContext {
    MatchContext {
        home_team: "Benfica".to_string(),
        away_team: "Porto".to_string(),
        league: "Primeira Liga".to_string(),
        match_date: Utc.with_ymd_and_hms(2025, 3, 8, 20, 15, 0).unwrap(),
        home_stats: TeamStats::new(2.0, 0.9, 0.9)
            .with_home_advantage(1.15)
            .with_injury_impact(0.95),
        away_stats: TeamStats::new(1.5, 1.1, 0.85),
        head_to_head: BTreeMap::from([("home_wins_last_10".to_string(), 4.0)]),
    }
}

fn quotes(home: f64, draw: f64, away: f64) -> OddsQuote {
    BTreeMap::from([
        ("home_win".to_string(), home),
        ("draw".to_string(), draw),
        ("away_win".to_string(), away),
    ])
}

#[test]
fn test_full_pipeline_produces_consistent_advice() {
    let config: AppConfig = toml::from_str(
        r#"
        [advisor]
        min_value_threshold = 0.05

        [staking]
        risk_factor = 0.5
        min_stake = 10.0
        max_stake_percentage = 0.05
        initial_bankroll = 1000.0
        "#,
    )
    .unwrap();
    validate_config(&config).unwrap();

    let advisor = MatchAdvisor::from_config(&config);
    let bankroll = config.staking.initial_bankroll;

    // Quotes generous enough that the modeled edge clears the threshold.
    let advice = advisor
        .advise(&derby_context(), &quotes(2.6, 3.9, 5.0), bankroll)
        .unwrap();

    assert!(!advice.is_empty());
    for item in &advice {
        assert!(item.signal.expected_value > 0.05);
        assert!(item.signal.probability > 0.0 && item.signal.probability < 1.0);
        assert!(item.stake.stake <= bankroll * 0.05 + 0.005);
        assert!(item.stake.kelly_fraction <= 0.5);
        assert!(item.expected_roi > 0.0);
    }
    for pair in advice.windows(2) {
        assert!(pair[0].signal.expected_value >= pair[1].signal.expected_value);
    }
}

#[test]
fn test_tight_market_yields_no_advice() {
    let advisor = MatchAdvisor::from_config(&AppConfig::default());

    // Odds close to the model's fair prices leave no exploitable edge.
    let probs = ProbabilityModel::default()
        .estimate(&derby_context())
        .unwrap();
    let fair = quotes(
        1.0 / probs.home_win,
        1.0 / probs.draw,
        1.0 / probs.away_win,
    );

    let advice = advisor.advise(&derby_context(), &fair, 1000.0).unwrap();
    assert!(advice.is_empty());
}

#[test]
fn test_detector_and_sizer_agree_on_worked_example() {
    // The classic half-Kelly example: p = 0.55 at evens.
    let detector = ValueDetector::new(0.05);
    let probs: BTreeMap<String, f64> =
        BTreeMap::from([("home_win".to_string(), 0.55)]);
    let odds: BTreeMap<String, f64> =
        BTreeMap::from([("home_win".to_string(), 2.0)]);

    let signals = detector.find_value_bets(&probs, &odds).unwrap();
    assert_eq!(signals.len(), 1);
    assert!((signals[0].expected_value - 0.10).abs() < 1e-9);
    assert_eq!(signals[0].confidence, Confidence::Medium);

    let sizer = StakeSizer::new(10.0, 0.05);
    let params =
        KellyParameters::new(signals[0].probability, signals[0].odds);
    let rec = sizer.optimal_stake(1000.0, &params).unwrap();
    assert!((rec.kelly_fraction - 0.05).abs() < 1e-9);
    assert!((rec.stake - 50.0).abs() < 1e-9);

    let roi = StakeSizer::expected_roi(0.55, 2.0, rec.kelly_fraction).unwrap();
    assert!((roi - 0.5).abs() < 1e-6);
}

#[test]
fn test_advice_serializes_for_notification() {
    let advisor = MatchAdvisor::from_config(&AppConfig::default());
    let advice = advisor
        .advise(&derby_context(), &quotes(2.6, 3.9, 5.0), 1000.0)
        .unwrap();

    let json = serde_json::to_string(&advice).unwrap();
    assert!(json.contains("outcome"));
    assert!(json.contains("kelly_fraction"));
}
