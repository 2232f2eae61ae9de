//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    min_value_threshold = config.advisor.min_value_threshold,
    risk_factor = config.staking.risk_factor,
    bankroll = config.staking.initial_bankroll,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Positive numeric values where required
/// - Valid fraction ranges (0..1)
/// - A Poisson grid cutoff large enough for realistic goal rates
pub fn validate_config(config: &AppConfig) -> Result<()> {
  // Advisor validation
  anyhow::ensure!(
    config.advisor.min_value_threshold >= 0.0,
    "min_value_threshold must be non-negative, got {}",
    config.advisor.min_value_threshold
  );
  anyhow::ensure!(
    (3..=20).contains(&config.advisor.max_goals),
    "max_goals must be in [3, 20], got {}",
    config.advisor.max_goals
  );

  // Staking validation
  anyhow::ensure!(
    config.staking.risk_factor > 0.0 && config.staking.risk_factor <= 1.0,
    "risk_factor must be in (0, 1], got {}",
    config.staking.risk_factor
  );
  anyhow::ensure!(
    config.staking.min_stake >= 0.0,
    "min_stake must be non-negative, got {}",
    config.staking.min_stake
  );
  anyhow::ensure!(
    config.staking.max_stake_percentage > 0.0
      && config.staking.max_stake_percentage <= 1.0,
    "max_stake_percentage must be in (0, 1], got {}",
    config.staking.max_stake_percentage
  );
  anyhow::ensure!(
    config.staking.initial_bankroll > 0.0,
    "initial_bankroll must be positive, got {}",
    config.staking.initial_bankroll
  );

  Ok(())
}
