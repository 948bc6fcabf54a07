//! Ordered pool draw-down shared by the withdrawal and investment allocators.

use rust_decimal::Decimal;

use crate::accounts::{Account, Pool};

/// Pools drained by a withdrawal, in priority order. Bonus is never withdrawable.
pub const WITHDRAWAL_DEBIT_ORDER: [Pool; 2] = [Pool::Balance, Pool::ReferralEarnings];

/// Pools drained by an investment, in priority order. Bonus goes first so the
/// withdrawable pools are touched last.
pub const INVESTMENT_DEBIT_ORDER: [Pool; 3] = [Pool::Bonus, Pool::Balance, Pool::ReferralEarnings];

/// Sum of the given pools on an account, saturating at `Decimal::MAX`.
pub fn available_in(account: &Account, order: &[Pool]) -> Decimal {
    account.sum_of(order)
}

/// Draws `amount` from the pools in order, each giving `min(pool, remaining)`.
///
/// Returns what could not be covered. Callers check sufficiency first so the
/// remainder is zero on every accepted operation; pools never go below zero.
pub fn debit_in_order(account: &mut Account, order: &[Pool], amount: Decimal) -> Decimal {
    let mut remaining = amount;
    for pool in order {
        if remaining <= Decimal::ZERO {
            break;
        }
        let funds = account.pool_mut(*pool);
        if *funds <= Decimal::ZERO {
            continue;
        }
        let used = (*funds).min(remaining);
        *funds -= used;
        remaining -= used;
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal, bonus: Decimal, referral: Decimal) -> Account {
        Account {
            balance,
            bonus,
            referral_earnings: referral,
            ..Default::default()
        }
    }

    #[test]
    fn test_debit_drains_pools_in_order() {
        let mut acc = account(dec!(100), dec!(100), dec!(100));
        let left = debit_in_order(&mut acc, &INVESTMENT_DEBIT_ORDER, dec!(150));
        assert_eq!(left, Decimal::ZERO);
        assert_eq!(acc.bonus, Decimal::ZERO);
        assert_eq!(acc.balance, dec!(50));
        assert_eq!(acc.referral_earnings, dec!(100));
    }

    #[test]
    fn test_debit_reports_uncovered_remainder() {
        let mut acc = account(dec!(20), dec!(0), dec!(30));
        let left = debit_in_order(&mut acc, &WITHDRAWAL_DEBIT_ORDER, dec!(80));
        assert_eq!(left, dec!(30));
        assert_eq!(acc.balance, Decimal::ZERO);
        assert_eq!(acc.referral_earnings, Decimal::ZERO);
    }

    #[test]
    fn test_available_saturates_instead_of_overflowing() {
        let acc = account(Decimal::MAX, dec!(1), Decimal::MAX);
        assert_eq!(available_in(&acc, &INVESTMENT_DEBIT_ORDER), Decimal::MAX);
        assert_eq!(available_in(&acc, &[Pool::Bonus]), dec!(1));
    }

    #[test]
    fn test_withdrawal_order_skips_bonus() {
        let acc = account(dec!(10), dec!(500), dec!(5));
        assert_eq!(available_in(&acc, &WITHDRAWAL_DEBIT_ORDER), dec!(15));
        assert_eq!(available_in(&acc, &INVESTMENT_DEBIT_ORDER), dec!(515));
    }
}
