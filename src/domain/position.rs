//! Position row model.
//!
//! A position is an ordered set of outcome rows (decimal odds, stake,
//! distribution flag) plus a bankroll entry and an optional fixed-row
//! designation. Numeric fields store what the user last entered, which
//! may not be a number at all; the sentinel is kept explicit so that
//! validation and the solver can react to it instead of arithmetic
//! silently going wrong.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;

/// Odds assigned to a freshly created row.
pub const DEFAULT_ODDS: Decimal = dec!(2);

// ────────────────────────────────────────────
// Numeric entry (value or unparseable sentinel)
// ────────────────────────────────────────────

/// A numeric field as last entered through the view layer.
///
/// `Decimal` has no NaN, so malformed entries are carried as an explicit
/// `NotANumber` sentinel. The validator maps the sentinel to a per-field
/// error and the metrics treat it as degenerate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericEntry {
    /// A successfully parsed finite value.
    Value(Decimal),
    /// The entry could not be parsed as a number.
    NotANumber,
}

impl NumericEntry {
    /// Parses free-form field text. Never fails; malformed text becomes
    /// the `NotANumber` sentinel.
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<Decimal>()
            .map_or(Self::NotANumber, Self::Value)
    }

    /// Converts a float, mapping NaN and infinities to the sentinel.
    pub fn from_f64(value: f64) -> Self {
        Decimal::from_f64(value).map_or(Self::NotANumber, Self::Value)
    }

    /// The parsed value, if the entry was a number.
    pub const fn value(self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotANumber => None,
        }
    }

    /// The parsed value, or zero for the sentinel. Used where the
    /// calculation clamps bad input to a harmless contribution.
    pub const fn or_zero(self) -> Decimal {
        match self {
            Self::Value(v) => v,
            Self::NotANumber => Decimal::ZERO,
        }
    }
}

impl From<Decimal> for NumericEntry {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

// ────────────────────────────────────────────
// Outcome rows and the position itself
// ────────────────────────────────────────────

/// One outcome row of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRow {
    /// Decimal odds (multiplier on stake, e.g. 2.10).
    pub odds: NumericEntry,
    /// Money staked on this outcome.
    pub stake: NumericEntry,
    /// Distribution flag: `true` shares the profit surplus, `false` is
    /// hedged to exactly zero profit.
    pub recipient: bool,
    /// Set when the user hand-edited the stake; a manual stake is never
    /// overwritten by solver suggestions.
    pub manual: bool,
}

impl OutcomeRow {
    /// A row with the given odds and otherwise default state.
    pub fn with_odds(odds: Decimal) -> Self {
        Self {
            odds: NumericEntry::Value(odds),
            ..Self::default()
        }
    }
}

impl Default for OutcomeRow {
    fn default() -> Self {
        Self {
            odds: NumericEntry::Value(DEFAULT_ODDS),
            stake: NumericEntry::Value(Decimal::ZERO),
            recipient: true,
            manual: false,
        }
    }
}

/// The whole position: rows, optional fixed-row index, bankroll entry.
///
/// Owned by the session, which is the single writer; a recompute pass
/// reads and merges into it synchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Outcome rows, in display order. Always at least one.
    pub rows: Vec<OutcomeRow>,
    /// Index of the pinned row, when in fixed-row-driven mode.
    pub fixed: Option<usize>,
    /// The total-money entry as last typed by the user.
    pub bankroll: NumericEntry,
}

impl Position {
    /// A position with `row_count` default rows (at least one) and a
    /// zero bankroll.
    pub fn new(row_count: usize) -> Self {
        Self {
            rows: vec![OutcomeRow::default(); row_count.max(1)],
            fixed: None,
            bankroll: NumericEntry::Value(Decimal::ZERO),
        }
    }

    /// A position over the given rows. An empty list gets one default row.
    pub fn from_rows(rows: Vec<OutcomeRow>) -> Self {
        let mut position = Self::new(1);
        if !rows.is_empty() {
            position.rows = rows;
        }
        position
    }

    /// Truncates or pads the row list to `row_count` (at least one),
    /// padding with default rows. The fixed index is unset if it falls
    /// out of range.
    pub fn set_row_count(&mut self, row_count: usize) {
        self.rows.resize_with(row_count.max(1), OutcomeRow::default);
        self.normalize();
    }

    /// Unsets the fixed index when it no longer points at a row.
    pub fn normalize(&mut self) {
        if self.fixed.is_some_and(|j| j >= self.rows.len()) {
            self.fixed = None;
        }
    }
}

/// Index of the first row flagged as a profit recipient.
pub fn first_recipient(rows: &[OutcomeRow]) -> Option<usize> {
    rows.iter().position(|row| row.recipient)
}
