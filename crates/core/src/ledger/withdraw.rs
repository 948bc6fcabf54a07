use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use super::allocation::{available_in, debit_in_order, WITHDRAWAL_DEBIT_ORDER};
use crate::accounts::Account;
use crate::constants::id_prefixes;
use crate::errors::WithdrawError;
use crate::policy::LedgerPolicy;
use crate::transactions::{generate_id, Transaction, TransactionStatus, TransactionType};

/// Runs the withdrawal gates and, if all pass, debits the account.
///
/// Gates run in this order and the first failure wins:
/// 1. `now` (local wall-clock) is inside the withdrawal window
/// 2. `amount` reaches the minimum withdrawal
/// 3. the account has invested at least once
/// 4. `amount` is covered by balance plus referral earnings
///
/// The debit takes balance first, then referral earnings. The returned
/// transaction is `Pending`; payout happens outside the engine.
pub fn attempt_withdraw<Z: TimeZone>(
    account: &Account,
    amount: Decimal,
    method: &str,
    now: &DateTime<Z>,
    policy: &LedgerPolicy,
) -> Result<(Account, Transaction), WithdrawError> {
    let window = &policy.withdraw_window;
    if !window.contains(now) {
        return Err(WithdrawError::OutsideWindow {
            days: window.days.clone(),
            start_hour: window.start_hour,
            end_hour: window.end_hour,
        });
    }

    if amount < policy.min_withdrawal {
        return Err(WithdrawError::BelowMinimum {
            minimum: policy.min_withdrawal,
            amount,
        });
    }

    if !account.has_invested {
        return Err(WithdrawError::NoInvestmentYet);
    }

    let available = available_in(account, &WITHDRAWAL_DEBIT_ORDER);
    if amount > available {
        return Err(WithdrawError::InsufficientFunds {
            requested: amount,
            available,
        });
    }

    let mut updated = account.clone();
    let uncovered = debit_in_order(&mut updated, &WITHDRAWAL_DEBIT_ORDER, amount);
    debug_assert!(uncovered.is_zero());

    let tx = Transaction {
        id: generate_id(id_prefixes::WITHDRAWAL),
        transaction_type: TransactionType::Withdrawal,
        amount,
        status: TransactionStatus::Pending,
        date: now.with_timezone(&Utc),
        method: Some(method.to_string()),
    };
    Ok((updated, tx))
}
