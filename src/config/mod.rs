//! Configuration Module - TOML-based Calculator Configuration
//!
//! Loads the starting position and display options from `config.toml`.
//! Odds bounds and row defaults live in the domain layer; the config
//! only describes the concrete position a session starts from.

pub mod loader;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::position::{NumericEntry, OutcomeRow, Position};

/// Top-level configuration.
///
/// Loaded from `config.toml` at startup and validated before the
/// session starts.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// App-level settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Output rendering options.
    #[serde(default)]
    pub display: DisplayConfig,
    /// The position the session starts from.
    pub position: PositionConfig,
}

/// App-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Output rendering options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// How to render the pass result.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for the pass result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain-text table on stdout.
    #[default]
    Table,
    /// The output record as pretty JSON.
    Json,
}

/// The starting position.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionConfig {
    /// Total bankroll to split across the rows.
    #[serde(default)]
    pub bankroll: f64,
    /// Pin this row's stake (fixed-row-driven mode).
    pub fixed: Option<usize>,
    /// Outcome rows, at least one.
    pub rows: Vec<RowConfig>,
}

/// One outcome row of the starting position.
#[derive(Debug, Clone, Deserialize)]
pub struct RowConfig {
    /// Decimal odds for this outcome.
    pub odds: f64,
    /// Pre-set stake. A configured stake is pinned manual so the solver
    /// leaves it alone.
    pub stake: Option<f64>,
    /// Whether this row shares the profit surplus.
    #[serde(default = "default_true")]
    pub recipient: bool,
}

impl PositionConfig {
    /// Builds the domain position this config describes.
    ///
    /// NaN or infinite floats become not-a-number entries; validation
    /// reports them on the first pass.
    pub fn to_position(&self) -> Position {
        let rows = self
            .rows
            .iter()
            .map(|row| OutcomeRow {
                odds: NumericEntry::from_f64(row.odds),
                stake: row
                    .stake
                    .map_or(NumericEntry::Value(Decimal::ZERO), NumericEntry::from_f64),
                recipient: row.recipient,
                manual: row.stake.is_some(),
            })
            .collect();

        let mut position = Position::from_rows(rows);
        position.fixed = self.fixed;
        position.bankroll = NumericEntry::from_f64(self.bankroll);
        position.normalize();
        position
    }
}

// Default value functions for serde

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
