//! Stake allocation.
//!
//! Splits money across mutually exclusive outcomes so that every
//! non-recipient row returns exactly zero profit and every recipient row
//! earns the same surplus K. With A the inverse-odds sum over all rows
//! and AR the sum over recipients only:
//!
//! - bankroll-driven: T is given, K = T * (1 - A) / AR
//! - fixed-row-driven: row j's stake sj is given,
//!   T = (sj * oj * AR) / (1 - A + AR), K = sj * oj - T
//!
//! Either way each row stakes payout-target / odds: T for hedged rows,
//! T + K for recipients. A degenerate inverse-odds sum, or an allocation
//! too large to represent, makes the solver decline (`None`) so callers
//! keep the current stakes instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::metrics;
use crate::domain::position::{OutcomeRow, first_recipient};

/// Denominator magnitude below which the fixed-row system is treated as
/// singular and the approximate fallback (T = sj * oj, K = 0) is used.
const SINGULAR_EPSILON: Decimal = dec!(0.000000000001);

/// Splits `bankroll` across the rows.
///
/// Declines when there is no recipient row to absorb the surplus, when
/// the inverse-odds sums are degenerate, or when a payout target exceeds
/// the numeric range. A negative bankroll allocates as zero.
pub fn allocate_from_bankroll(rows: &[OutcomeRow], bankroll: Decimal) -> Option<Vec<Decimal>> {
    let all = metrics::inverse_odds_sum(rows)?;
    let recipients = metrics::inverse_odds_sum(rows.iter().filter(|row| row.recipient))?;
    if recipients.is_zero() {
        return None;
    }

    let total = bankroll.max(Decimal::ZERO);
    let surplus = total.checked_mul(Decimal::ONE - all)?.checked_div(recipients)?;
    let mut stakes = spread_stakes(rows, total, surplus)?;

    // Rounding drift lands on the first recipient so the stakes sum back
    // to the target total.
    let anchor = first_recipient(rows)?;
    let summed = stakes
        .iter()
        .try_fold(Decimal::ZERO, |acc, stake| acc.checked_add(*stake))?;
    stakes[anchor] = (stakes[anchor] + (total - summed))
        .round_dp(2)
        .max(Decimal::ZERO);

    Some(stakes)
}

/// Derives the total implied by pinning row `fixed` at its current stake
/// and splits accordingly.
///
/// Declines when the pinned row is not a recipient (the caller falls back
/// to bankroll-driven mode), when the sums are degenerate, or when the
/// pinned payout exceeds the numeric range. The pinned row's own stake is
/// authoritative and is returned exactly as entered, rounded to 2 decimals.
pub fn allocate_from_fixed(rows: &[OutcomeRow], fixed: usize) -> Option<Vec<Decimal>> {
    let pinned_row = rows.get(fixed)?;
    if !pinned_row.recipient {
        return None;
    }
    let odds = pinned_row.odds.value()?;
    let all = metrics::inverse_odds_sum(rows)?;
    let recipients = metrics::inverse_odds_sum(rows.iter().filter(|row| row.recipient))?;

    let pinned = pinned_row.stake.or_zero().max(Decimal::ZERO);
    let pinned_payout = pinned.checked_mul(odds)?;

    let denominator = Decimal::ONE - all + recipients;
    let (total, surplus) = if denominator.abs() < SINGULAR_EPSILON {
        (pinned_payout, Decimal::ZERO)
    } else {
        let total = pinned_payout
            .checked_mul(recipients)?
            .checked_div(denominator)?;
        (total, pinned_payout.checked_sub(total)?)
    };

    let mut stakes = spread_stakes(rows, total, surplus)?;
    stakes[fixed] = pinned.round_dp(2);

    Some(stakes)
}

/// Shared per-row formula: hedged rows target T, recipients target T + K.
fn spread_stakes(rows: &[OutcomeRow], total: Decimal, surplus: Decimal) -> Option<Vec<Decimal>> {
    rows.iter()
        .map(|row| {
            let odds = row.odds.value()?;
            let target = if row.recipient {
                total.checked_add(surplus)?
            } else {
                total
            };
            let stake = target.checked_div(odds)?;
            Some(stake.max(Decimal::ZERO).round_dp(2))
        })
        .collect()
}
