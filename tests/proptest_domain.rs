//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that the solver and the recompute pass
//! maintain their mathematical invariants across random positions.
//! Odds and money are generated as whole cents so every input is
//! exactly representable.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use surebet_solver::domain::position::{NumericEntry, OutcomeRow, Position};
use surebet_solver::domain::solver;
use surebet_solver::ports::focus::NoFocus;
use surebet_solver::usecases::session::Session;

fn decimal_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn position_from(odds_cents: &[i64], bankroll_cents: i64) -> Position {
    let rows = odds_cents
        .iter()
        .map(|&cents| OutcomeRow::with_odds(decimal_cents(cents)))
        .collect();
    let mut position = Position::from_rows(rows);
    position.bankroll = NumericEntry::Value(decimal_cents(bankroll_cents));
    position
}

/// Stakes, payouts and profits each round to cents and the first
/// recipient absorbs the split residual, so cross-row comparisons get a
/// few cents of slack per unit of odds.
fn rounding_tolerance(position: &Position) -> Decimal {
    let max_odds = position
        .rows
        .iter()
        .map(|row| row.odds.or_zero())
        .max()
        .unwrap_or(Decimal::ONE);
    dec!(0.05) + dec!(0.04) * max_odds
}

// ── Solver Properties ───────────────────────────────────────

proptest! {
    /// Bankroll-driven stakes are never negative and always land on
    /// whole cents.
    #[test]
    fn bankroll_stakes_non_negative_and_cent_quantized(
        odds_cents in prop::collection::vec(105i64..=1000, 2..=5),
        bankroll_cents in 0i64..=10_000_000,
    ) {
        let position = position_from(&odds_cents, bankroll_cents);
        let stakes = solver::allocate_from_bankroll(
            &position.rows,
            position.bankroll.or_zero(),
        )
        .expect("solver declined a solvable position");
        for stake in stakes {
            prop_assert!(stake >= Decimal::ZERO, "negative stake {stake}");
            prop_assert_eq!(stake, stake.round_dp(2), "stake not cent-quantized");
        }
    }

    /// With every row receiving, the whole bankroll is placed: the
    /// cent-rounded stakes sum back to the bankroll exactly.
    #[test]
    fn bankroll_is_conserved_across_recipient_rows(
        odds_cents in prop::collection::vec(105i64..=1000, 2..=5),
        bankroll_cents in 10_000i64..=10_000_000,
    ) {
        let position = position_from(&odds_cents, bankroll_cents);
        let mut session = Session::new(position);
        let out = session.recompute(&NoFocus);
        prop_assert!(out.validation.valid);
        prop_assert_eq!(out.total, decimal_cents(bankroll_cents));
        prop_assert_eq!(out.bankroll_display, Some(decimal_cents(bankroll_cents)));
    }

    /// Recipient rows all settle to the same profit, whichever outcome
    /// wins.
    #[test]
    fn recipient_rows_share_equal_profit(
        odds_cents in prop::collection::vec(105i64..=1000, 2..=5),
        bankroll_cents in 10_000i64..=10_000_000,
    ) {
        let position = position_from(&odds_cents, bankroll_cents);
        let tolerance = rounding_tolerance(&position);
        let mut session = Session::new(position);
        let out = session.recompute(&NoFocus);
        for window in out.profits.windows(2) {
            let gap = (window[0] - window[1]).abs();
            prop_assert!(
                gap <= tolerance,
                "profits {} and {} differ by more than {tolerance}",
                window[0],
                window[1]
            );
        }
    }

    /// A pinned stake is authoritative: the pass reports it back to the
    /// cent and the other rows settle to the same profit.
    #[test]
    fn fixed_row_stake_is_authoritative(
        odds_cents in prop::collection::vec(105i64..=1000, 2..=5),
        stake_cents in 100i64..=1_000_000,
    ) {
        let mut position = position_from(&odds_cents, 0);
        position.rows[0].stake = NumericEntry::Value(decimal_cents(stake_cents));
        position.fixed = Some(0);
        let tolerance = rounding_tolerance(&position);

        let mut session = Session::new(position);
        let out = session.recompute(&NoFocus);
        prop_assert!(out.validation.valid);
        prop_assert_eq!(out.stakes[0], decimal_cents(stake_cents));
        for window in out.profits.windows(2) {
            let gap = (window[0] - window[1]).abs();
            prop_assert!(gap <= tolerance, "fixed-mode profits diverge by {gap}");
        }
    }

    /// Rows taken out of the distribution are hedged flat: their payout
    /// matches the total stake to within rounding.
    #[test]
    fn hedged_rows_profit_nothing(
        rows in prop::collection::vec((205i64..=1000, any::<bool>()), 2..=4),
        bankroll_cents in 10_000i64..=10_000_000,
    ) {
        prop_assume!(rows.iter().any(|&(_, recipient)| recipient));
        prop_assume!(rows.iter().any(|&(_, recipient)| !recipient));
        let inverse_sum: Decimal = rows
            .iter()
            .map(|&(cents, _)| Decimal::ONE / decimal_cents(cents))
            .sum();
        // keep the surplus positive so no stake clamps at zero
        prop_assume!(inverse_sum < dec!(0.999));

        let odds_cents: Vec<i64> = rows.iter().map(|&(cents, _)| cents).collect();
        let mut position = position_from(&odds_cents, bankroll_cents);
        for (row, &(_, recipient)) in position.rows.iter_mut().zip(&rows) {
            row.recipient = recipient;
        }
        let tolerance = rounding_tolerance(&position);

        let mut session = Session::new(position);
        let out = session.recompute(&NoFocus);
        prop_assert!(out.validation.valid);
        for (i, &(_, recipient)) in rows.iter().enumerate() {
            if !recipient {
                prop_assert!(
                    out.profits[i].abs() <= tolerance,
                    "hedged row {} shows profit {}",
                    i,
                    out.profits[i]
                );
            }
        }
    }

    /// Away from the break-even line, the arbitrage flag and the sign
    /// of every profit agree.
    #[test]
    fn arbitrage_flag_matches_profit_sign(
        odds_cents in prop::collection::vec(105i64..=1000, 2..=5),
        bankroll_cents in 100_000i64..=10_000_000,
    ) {
        let inverse_sum: Decimal = odds_cents
            .iter()
            .map(|&cents| Decimal::ONE / decimal_cents(cents))
            .sum();
        prop_assume!(inverse_sum < dec!(0.95) || inverse_sum > dec!(1.05));

        let position = position_from(&odds_cents, bankroll_cents);
        let mut session = Session::new(position);
        let out = session.recompute(&NoFocus);
        for profit in &out.profits {
            if out.arbitrage.is_arb {
                prop_assert!(*profit > Decimal::ZERO, "arb but profit {profit} <= 0");
            } else {
                prop_assert!(*profit < Decimal::ZERO, "no arb but profit {profit} >= 0");
            }
        }
    }
}

// ── Recompute Pass Properties ───────────────────────────────

proptest! {
    /// Running the pass twice with no edit in between changes nothing.
    #[test]
    fn recompute_pass_is_idempotent(
        rows in prop::collection::vec(
            (105i64..=1000, 0i64..=1_000_000, any::<bool>(), any::<bool>()),
            2..=5,
        ),
        bankroll_cents in 0i64..=10_000_000,
        fixed in prop::option::of(0usize..5),
    ) {
        let outcome_rows = rows
            .iter()
            .map(|&(odds, stake, recipient, manual)| OutcomeRow {
                odds: NumericEntry::Value(decimal_cents(odds)),
                stake: NumericEntry::Value(decimal_cents(stake)),
                recipient,
                manual,
            })
            .collect();
        let mut position = Position::from_rows(outcome_rows);
        position.bankroll = NumericEntry::Value(decimal_cents(bankroll_cents));
        position.fixed = fixed;

        let mut session = Session::new(position);
        let first = session.recompute(&NoFocus);
        let second = session.recompute(&NoFocus);
        prop_assert_eq!(first, second);
    }

    /// Hand-entered stakes survive the pass untouched, whatever the
    /// solver suggests for the rest of the position.
    #[test]
    fn manual_stakes_survive_recompute(
        odds_cents in prop::collection::vec(105i64..=1000, 2..=5),
        manual_flags in prop::collection::vec(any::<bool>(), 2..=5),
        stake_cents in 0i64..=1_000_000,
        bankroll_cents in 0i64..=10_000_000,
    ) {
        let mut position = position_from(&odds_cents, bankroll_cents);
        for (row, &manual) in position.rows.iter_mut().zip(&manual_flags) {
            if manual {
                row.stake = NumericEntry::Value(decimal_cents(stake_cents));
                row.manual = true;
            }
        }
        let pinned: Vec<Option<Decimal>> = position
            .rows
            .iter()
            .map(|row| row.manual.then_some(row.stake.or_zero()))
            .collect();

        let mut session = Session::new(position);
        let out = session.recompute(&NoFocus);
        for (i, expected) in pinned.iter().enumerate() {
            if let Some(expected) = expected {
                prop_assert_eq!(out.stakes[i], *expected, "manual row {} rewritten", i);
            }
        }
    }
}
