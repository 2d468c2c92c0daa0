//! Position validation.
//!
//! Full-feedback checking: every field is checked independently and every
//! error is reported at once; nothing short-circuits and nothing panics.
//! Validation never blocks a recompute pass, it only drives the overall
//! validity flag that the view uses to suppress derived figures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use crate::domain::position::{NumericEntry, Position, first_recipient};

/// Exclusive lower bound for decimal odds.
pub const MIN_ODDS: Decimal = dec!(1);
/// Exclusive upper bound for decimal odds.
pub const MAX_ODDS: Decimal = dec!(100000);

/// Everything that can be wrong with a position's fields.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidationError {
    #[error("odds must be greater than 1 and less than 100000, got {odds}")]
    OddsOutOfRange { odds: Decimal },

    #[error("odds entry is not a number")]
    OddsNotANumber,

    #[error("stake cannot be negative, got {stake}")]
    StakeNegative { stake: Decimal },

    #[error("stake entry is not a number")]
    StakeNotANumber,

    #[error("bankroll must be a non-negative number")]
    BankrollInvalid,

    #[error("at least one row must be flagged as a profit recipient")]
    NoRecipientRow,

    #[error("fixed row {row} is not a profit recipient")]
    FixedRowNotRecipient { row: usize },

    #[error("fixed row {row} needs a positive stake")]
    FixedStakeInvalid { row: usize },
}

/// Field errors for a single row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowErrors {
    pub odds: Option<ValidationError>,
    pub stake: Option<ValidationError>,
}

impl RowErrors {
    /// Whether both fields passed.
    pub const fn is_clean(&self) -> bool {
        self.odds.is_none() && self.stake.is_none()
    }
}

/// Outcome of validating a whole position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// True only when every check below passed.
    pub valid: bool,
    /// Bankroll entry error, if any.
    pub bankroll: Option<ValidationError>,
    /// Position-level errors (recipient coverage, fixed-row designation).
    pub position: Vec<ValidationError>,
    /// Per-row field errors, one entry per row.
    pub rows: Vec<RowErrors>,
}

/// Checks every field of the position and reports all findings.
pub fn validate(position: &Position) -> ValidationReport {
    let rows: Vec<RowErrors> = position
        .rows
        .iter()
        .map(|row| RowErrors {
            odds: check_odds(row.odds),
            stake: check_stake(row.stake),
        })
        .collect();

    let bankroll = match position.bankroll.value() {
        Some(value) if value >= Decimal::ZERO => None,
        _ => Some(ValidationError::BankrollInvalid),
    };

    let mut position_errors = Vec::new();
    if first_recipient(&position.rows).is_none() {
        position_errors.push(ValidationError::NoRecipientRow);
    }
    if let Some(j) = position.fixed {
        if let Some(row) = position.rows.get(j) {
            if !row.recipient {
                position_errors.push(ValidationError::FixedRowNotRecipient { row: j });
            }
            if row.stake.value().is_none_or(|stake| stake <= Decimal::ZERO) {
                position_errors.push(ValidationError::FixedStakeInvalid { row: j });
            }
        }
    }

    let valid =
        bankroll.is_none() && position_errors.is_empty() && rows.iter().all(RowErrors::is_clean);

    ValidationReport {
        valid,
        bankroll,
        position: position_errors,
        rows,
    }
}

fn check_odds(entry: NumericEntry) -> Option<ValidationError> {
    match entry.value() {
        None => Some(ValidationError::OddsNotANumber),
        Some(odds) if odds <= MIN_ODDS || odds >= MAX_ODDS => {
            Some(ValidationError::OddsOutOfRange { odds })
        }
        Some(_) => None,
    }
}

fn check_stake(entry: NumericEntry) -> Option<ValidationError> {
    match entry.value() {
        None => Some(ValidationError::StakeNotANumber),
        Some(stake) if stake < Decimal::ZERO => Some(ValidationError::StakeNegative { stake }),
        Some(_) => None,
    }
}
