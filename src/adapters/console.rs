//! Console Adapter - Plain-Text View of a Recompute Pass
//!
//! Renders the position and its latest output record as a fixed-width
//! table. Derived monetary figures are shown as `-` while the position
//! fails validation; the raw entries stay visible so the user can see
//! what to fix.

use std::fmt::Write;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::position::{NumericEntry, Position};
use crate::usecases::session::PassOutput;

/// Renders one recompute pass as a table.
///
/// The output ends with a newline and is ready for `print!`.
pub fn render_table(position: &Position, output: &PassOutput) -> String {
    let valid = output.validation.valid;
    let mut text = String::new();

    let _ = writeln!(text, "=== Surebet Position ===");
    let _ = writeln!(
        text,
        "{:>3}  {:>10}  {:>12}  {:>12}  {:>12}  {:<5}",
        "row", "odds", "stake", "payout", "profit", "flags"
    );
    for (i, row) in position.rows.iter().enumerate() {
        let _ = writeln!(
            text,
            "{:>3}  {:>10}  {:>12}  {:>12}  {:>12}  {:<5}",
            i,
            entry_cell(row.odds),
            entry_cell(row.stake),
            money_cell(output.payouts[i], valid),
            money_cell(output.profits[i], valid),
            flags_cell(position, i),
        );
    }

    let _ = writeln!(text, "Total staked: {}", money_cell(output.total, valid));
    match output.bankroll_display {
        Some(mirror) if valid => {
            let _ = writeln!(text, "Bankroll field: {:.2}", mirror.round_dp(2));
        }
        _ => {}
    }
    let _ = writeln!(text, "Arbitrage: {}", arbitrage_cell(output, valid));
    let _ = writeln!(text, "ROI: {}", roi_cell(output, valid));

    if !valid {
        let _ = writeln!(text);
        let _ = writeln!(text, "=== Validation ===");
        if let Some(error) = &output.validation.bankroll {
            let _ = writeln!(text, "bankroll: {error}");
        }
        for (i, errors) in output.validation.rows.iter().enumerate() {
            if let Some(error) = &errors.odds {
                let _ = writeln!(text, "row {i} odds: {error}");
            }
            if let Some(error) = &errors.stake {
                let _ = writeln!(text, "row {i} stake: {error}");
            }
        }
        for error in &output.validation.position {
            let _ = writeln!(text, "position: {error}");
        }
    }

    text
}

fn entry_cell(entry: NumericEntry) -> String {
    match entry {
        NumericEntry::Value(value) => value.to_string(),
        NumericEntry::NotANumber => "NaN".to_string(),
    }
}

fn money_cell(value: Decimal, valid: bool) -> String {
    if valid {
        format!("{:.2}", value.round_dp(2))
    } else {
        "-".to_string()
    }
}

fn flags_cell(position: &Position, row: usize) -> String {
    let mut flags = String::new();
    if position.rows[row].recipient {
        flags.push('R');
    }
    if position.rows[row].manual {
        flags.push('M');
    }
    if position.fixed == Some(row) {
        flags.push('F');
    }
    if flags.is_empty() { "-".to_string() } else { flags }
}

fn arbitrage_cell(output: &PassOutput, valid: bool) -> String {
    if !valid {
        return "-".to_string();
    }
    match output.arbitrage.inverse_odds_sum {
        Some(sum) if output.arbitrage.is_arb => {
            format!("yes (inverse odds sum {:.4})", sum.round_dp(4))
        }
        Some(sum) => format!("no (inverse odds sum {:.4})", sum.round_dp(4)),
        None => "n/a".to_string(),
    }
}

fn roi_cell(output: &PassOutput, valid: bool) -> String {
    if !valid {
        return "-".to_string();
    }
    let percent = (output.roi.value * dec!(100)).round_dp(2);
    format!(
        "{percent:.2}% ({:?} row {})",
        output.roi.mode, output.roi.ref_row
    )
}
