//! Calculator session - Edit Handling and Recompute Pass
//!
//! The main use case. Owns the position (single writer), applies typed
//! field edits with their flag side effects, and runs the synchronous
//! recompute pass that:
//! 1. Normalizes stale state
//! 2. Validates every field
//! 3. Solves for stake suggestions (fixed-row mode with bankroll fallback)
//! 4. Merges suggestions into unshielded rows
//! 5. Derives totals, payouts, profits, arbitrage status and ROI
//!
//! The pass is a pure function of (position, focus): running it twice
//! with no intervening edit yields the same output.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::metrics;
use crate::domain::position::{NumericEntry, Position, first_recipient};
use crate::domain::solver;
use crate::domain::validate::{self, ValidationReport};
use crate::ports::focus::{EditField, FocusSource};

/// A typed edit coming from the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    /// New odds entered on a row.
    Odds { row: usize, entry: NumericEntry },
    /// A stake entered by hand; the row becomes manual.
    Stake { row: usize, entry: NumericEntry },
    /// A row's profit-recipient flag toggled.
    Recipient { row: usize, on: bool },
    /// A new bankroll entered; non-fixed rows lose their manual flag.
    Bankroll { entry: NumericEntry },
    /// The number of rows changed.
    RowCount { rows: usize },
    /// A row's stake pinned (fixed-row-driven mode).
    Fix { row: usize },
    /// The pinned row released.
    Unfix,
}

/// Which row anchors the reported return on investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoiMode {
    /// Anchored on the pinned row.
    Fixed,
    /// Anchored on the first recipient row (row 0 when none exists).
    Recipient,
}

/// Arbitrage assessment over the whole position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArbitrageStatus {
    /// Strictly profitable regardless of which outcome wins.
    pub is_arb: bool,
    /// Sum of 1/odds over all rows; absent when degenerate.
    pub inverse_odds_sum: Option<Decimal>,
}

/// Return on investment of the reference row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoiStatus {
    /// `(payout[ref_row] - total) / total`; zero when nothing is staked
    /// or the quotient is unrepresentable.
    pub value: Decimal,
    /// Row the ratio refers to.
    pub ref_row: usize,
    /// How the reference row was chosen.
    pub mode: RoiMode,
}

/// Everything one recompute pass produces for the view layer.
///
/// Derived monetary figures are always computed; the view is expected to
/// render them as unavailable when `validation.valid` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassOutput {
    /// Full-feedback validation result.
    pub validation: ValidationReport,
    /// Final per-row stakes after the merge (sentinel entries report zero).
    pub stakes: Vec<Decimal>,
    /// Gross return per row if that outcome wins.
    pub payouts: Vec<Decimal>,
    /// Net result per row if that outcome wins.
    pub profits: Vec<Decimal>,
    /// Total staked across the merged rows.
    pub total: Decimal,
    /// Arbitrage status of the current odds.
    pub arbitrage: ArbitrageStatus,
    /// Return on investment of the reference row.
    pub roi: RoiStatus,
    /// Value the view should write into the bankroll field; absent while
    /// that field is under active edit.
    pub bankroll_display: Option<Decimal>,
}

/// Calculator session owning the position across edits.
#[derive(Debug)]
pub struct Session {
    position: Position,
}

impl Session {
    /// Starts a session over the given position.
    pub const fn new(position: Position) -> Self {
        Self { position }
    }

    /// Read access for views and tests; the session is the only writer.
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Applies one edit with its flag side effects, then recomputes.
    pub fn apply(&mut self, edit: FieldEdit, focus: &dyn FocusSource) -> PassOutput {
        self.apply_edit(edit);
        self.recompute(focus)
    }

    /// One full synchronous pass over the position.
    #[instrument(skip(self, focus), level = "debug")]
    pub fn recompute(&mut self, focus: &dyn FocusSource) -> PassOutput {
        // 1. Normalize stale state (the fixed index may point past the rows)
        self.position.normalize();

        // 2. Validate every field; errors never stop the pass
        let validation = validate::validate(&self.position);

        // 3. Solve for stake suggestions
        let suggested = self.solve();

        // 4. Merge suggestions into rows that are not pinned, not manual
        //    and not under active edit
        let fixed = self.position.fixed;
        if let Some(stakes) = &suggested {
            for (i, row) in self.position.rows.iter_mut().enumerate() {
                let shielded =
                    fixed == Some(i) || row.manual || focus.is_focused(EditField::Stake(i));
                if !shielded {
                    row.stake = NumericEntry::Value(stakes[i]);
                }
            }
        } else {
            debug!("no allocation for this position, rows keep current stakes");
        }

        // 5. Totals and per-row figures from the merged rows
        let total = metrics::total_staked(&self.position.rows);
        let stakes: Vec<Decimal> = self
            .position
            .rows
            .iter()
            .map(|row| row.stake.or_zero())
            .collect();
        let payouts: Vec<Decimal> = self
            .position
            .rows
            .iter()
            .map(|row| metrics::payout(row.stake.or_zero(), row.odds.or_zero()))
            .collect();
        let profits: Vec<Decimal> = self
            .position
            .rows
            .iter()
            .map(|row| metrics::profit(row.stake.or_zero(), row.odds.or_zero(), total))
            .collect();

        // 6. Arbitrage: finite inverse-odds sum strictly below 1
        let inverse_odds_sum = metrics::inverse_odds_sum(&self.position.rows);
        let arbitrage = ArbitrageStatus {
            is_arb: inverse_odds_sum.is_some_and(|sum| sum < Decimal::ONE),
            inverse_odds_sum,
        };

        // 7. ROI anchored on the pinned row, else the first recipient
        let (ref_row, mode) = match fixed {
            Some(j) => (j, RoiMode::Fixed),
            None => (
                first_recipient(&self.position.rows).unwrap_or(0),
                RoiMode::Recipient,
            ),
        };
        let roi_value = if total > Decimal::ZERO {
            payouts[ref_row]
                .checked_sub(total)
                .and_then(|margin| margin.checked_div(total))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
        let roi = RoiStatus {
            value: roi_value,
            ref_row,
            mode,
        };

        // 8. The bankroll field mirrors the total unless it is being edited
        let bankroll_display = (!focus.is_focused(EditField::Bankroll)).then_some(total);

        debug!(
            mode = ?mode,
            total = %total,
            valid = validation.valid,
            "recompute pass done"
        );

        PassOutput {
            validation,
            stakes,
            payouts,
            profits,
            total,
            arbitrage,
            roi,
            bankroll_display,
        }
    }

    fn apply_edit(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Odds { row, entry } => {
                if let Some(r) = self.position.rows.get_mut(row) {
                    r.odds = entry;
                }
            }
            FieldEdit::Stake { row, entry } => {
                if let Some(r) = self.position.rows.get_mut(row) {
                    r.stake = entry;
                    r.manual = true;
                }
            }
            FieldEdit::Recipient { row, on } => {
                if let Some(r) = self.position.rows.get_mut(row) {
                    r.recipient = on;
                    // a pinned row that stops receiving profit cannot stay pinned
                    if !on && self.position.fixed == Some(row) {
                        self.position.fixed = None;
                    }
                }
            }
            FieldEdit::Bankroll { entry } => {
                self.position.bankroll = entry;
                let fixed = self.position.fixed;
                for (i, r) in self.position.rows.iter_mut().enumerate() {
                    if fixed != Some(i) {
                        r.manual = false;
                    }
                }
            }
            FieldEdit::RowCount { rows } => self.position.set_row_count(rows),
            FieldEdit::Fix { row } => {
                if row < self.position.rows.len() {
                    self.position.fixed = Some(row);
                    for (i, r) in self.position.rows.iter_mut().enumerate() {
                        if i != row {
                            r.manual = false;
                        }
                    }
                }
            }
            FieldEdit::Unfix => self.position.fixed = None,
        }
    }

    /// Fixed-row mode when a row is pinned, falling back to bankroll mode
    /// when that system has no solution.
    fn solve(&self) -> Option<Vec<Decimal>> {
        let rows = &self.position.rows;
        let bankroll = self.position.bankroll.or_zero();
        self.position.fixed.map_or_else(
            || solver::allocate_from_bankroll(rows, bankroll),
            |j| {
                solver::allocate_from_fixed(rows, j).or_else(|| {
                    debug!(row = j, "fixed-row mode has no solution, using bankroll");
                    solver::allocate_from_bankroll(rows, bankroll)
                })
            },
        )
    }
}
