//! Row-collection arithmetic.
//!
//! Pure helpers over outcome rows: staked totals, inverse-odds sums,
//! payout and profit. All money leaves these functions rounded to
//! 2 decimal places; intermediate sums keep full precision. Entries
//! large enough to overflow saturate at the numeric range, so the
//! recompute pass never aborts on a magnitude the validator accepts.

use rust_decimal::Decimal;

use crate::domain::position::OutcomeRow;

/// Sum of `max(0, stake)` over all rows, rounded to 2 decimals.
///
/// Negative or unparseable stakes contribute zero. That keeps the total
/// meaningful while the validator reports the offending field.
pub fn total_staked(rows: &[OutcomeRow]) -> Decimal {
    rows.iter()
        .map(|row| row.stake.or_zero().max(Decimal::ZERO))
        .fold(Decimal::ZERO, Decimal::saturating_add)
        .round_dp(2)
}

/// Sum of `1/odds` over the given rows.
///
/// Returns `None` when any selected row has missing or non-positive odds
/// (or the sum overflows): the position is degenerate and no finite sum
/// exists. Callers filter the selection (all rows, or recipients only)
/// before summing.
pub fn inverse_odds_sum<'a, I>(rows: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a OutcomeRow>,
{
    let mut sum = Decimal::ZERO;
    for row in rows {
        let odds = row.odds.value()?;
        if odds <= Decimal::ZERO {
            return None;
        }
        sum = sum.checked_add(Decimal::ONE.checked_div(odds)?)?;
    }
    Some(sum)
}

/// Gross return if this outcome wins: `max(0, stake) * odds`, 2 decimals.
pub fn payout(stake: Decimal, odds: Decimal) -> Decimal {
    stake.max(Decimal::ZERO).saturating_mul(odds).round_dp(2)
}

/// Net result if this outcome wins: payout minus the total staked.
pub fn profit(stake: Decimal, odds: Decimal, total: Decimal) -> Decimal {
    payout(stake, odds).saturating_sub(total).round_dp(2)
}
