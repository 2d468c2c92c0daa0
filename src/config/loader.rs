//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating the starting position,
//! and providing clear error messages for misconfiguration. Validation
//! here mirrors the domain bounds so a broken file fails at startup
//! with a pointed message instead of an all-red first pass.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;

use super::AppConfig;
use crate::domain::validate::{MAX_ODDS, MIN_ODDS};

/// Load and validate configuration from a TOML file.
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

    let config: AppConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    Ok(config)
}

/// Validate the starting position.
///
/// Checks for:
/// - At least one row, at least one recipient
/// - Odds within the domain bounds
/// - Finite, non-negative stakes and bankroll
/// - A fixed row that is a recipient with a positive stake
fn validate_config(config: &AppConfig) -> Result<()> {
    let position = &config.position;
    let min_odds = MIN_ODDS.to_f64().unwrap_or(1.0);
    let max_odds = MAX_ODDS.to_f64().unwrap_or(100_000.0);

    anyhow::ensure!(
        !position.rows.is_empty(),
        "Position must have at least one row"
    );
    anyhow::ensure!(
        position.rows.iter().any(|row| row.recipient),
        "Position must have at least one recipient row"
    );
    anyhow::ensure!(
        position.bankroll.is_finite() && position.bankroll >= 0.0,
        "Bankroll must be a finite non-negative number, got {}",
        position.bankroll
    );

    for (i, row) in position.rows.iter().enumerate() {
        anyhow::ensure!(
            row.odds.is_finite() && row.odds > min_odds && row.odds < max_odds,
            "Row {}: odds must be greater than {} and less than {}, got {}",
            i,
            min_odds,
            max_odds,
            row.odds
        );
        if let Some(stake) = row.stake {
            anyhow::ensure!(
                stake.is_finite() && stake >= 0.0,
                "Row {i}: stake must be a finite non-negative number, got {stake}"
            );
        }
    }

    if let Some(fixed) = position.fixed {
        let row = position
            .rows
            .get(fixed)
            .with_context(|| format!("Fixed row {fixed} is out of range"))?;
        anyhow::ensure!(
            row.recipient,
            "Fixed row {fixed} must be a recipient to drive the allocation"
        );
        anyhow::ensure!(
            row.stake.is_some_and(|stake| stake > 0.0),
            "Fixed row {fixed} needs a positive stake"
        );
    }

    Ok(())
}
