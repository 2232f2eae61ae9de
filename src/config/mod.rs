//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates the numeric thresholds and staking policy knobs
//! from `config.toml`. The knobs are opaque scalars to the domain layer -
//! nothing is hardcoded there.

pub mod loader;

use serde::Deserialize;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` by the application shell. All fields are
/// validated before any advice is produced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Probability model and value detection parameters.
  #[serde(default)]
  pub advisor: AdvisorConfig,
  /// Stake sizing policy.
  #[serde(default)]
  pub staking: StakingConfig,
}

/// Probability model and value detection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
  /// Minimum expected value for a signal to be reported (strict cutoff).
  #[serde(default = "default_min_value_threshold")]
  pub min_value_threshold: f64,
  /// Scoreline grid cutoff for the Poisson model (goals per side).
  #[serde(default = "default_max_goals")]
  pub max_goals: u32,
}

/// Stake sizing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StakingConfig {
  /// Fraction of full Kelly to apply (0.5 = half-Kelly).
  #[serde(default = "default_risk_factor")]
  pub risk_factor: f64,
  /// Minimum stake in currency units (advisory; the bankroll cap wins).
  #[serde(default = "default_min_stake")]
  pub min_stake: f64,
  /// Maximum stake as a fraction of bankroll.
  #[serde(default = "default_max_stake_percentage")]
  pub max_stake_percentage: f64,
  /// Starting bankroll handed to the bankroll-tracking collaborator.
  #[serde(default = "default_initial_bankroll")]
  pub initial_bankroll: f64,
}

impl Default for AdvisorConfig {
  fn default() -> Self {
    Self {
      min_value_threshold: default_min_value_threshold(),
      max_goals: default_max_goals(),
    }
  }
}

impl Default for StakingConfig {
  fn default() -> Self {
    Self {
      risk_factor: default_risk_factor(),
      min_stake: default_min_stake(),
      max_stake_percentage: default_max_stake_percentage(),
      initial_bankroll: default_initial_bankroll(),
    }
  }
}

// Default value functions for serde

fn default_min_value_threshold() -> f64 {
  0.05
}

fn default_max_goals() -> u32 {
  crate::domain::poisson::DEFAULT_MAX_GOALS
}

fn default_risk_factor() -> f64 {
  0.5
}

fn default_min_stake() -> f64 {
  10.0
}

fn default_max_stake_percentage() -> f64 {
  0.05
}

fn default_initial_bankroll() -> f64 {
  1000.0
}
