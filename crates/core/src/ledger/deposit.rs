use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::constants::id_prefixes;
use crate::errors::DepositError;
use crate::transactions::{generate_id, Transaction, TransactionStatus, TransactionType};

/// Checks a deposit request and builds its pending record.
///
/// Pool balances are untouched: a deposit only reaches the account once it is
/// settled outside the engine. A non-blank `reference` (the payer's transfer
/// receipt code) becomes the transaction id.
pub fn validate_deposit(
    amount: Decimal,
    min_deposit: Decimal,
    method: &str,
    reference: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Transaction, DepositError> {
    if amount < min_deposit {
        return Err(DepositError::BelowMinimum {
            minimum: min_deposit,
            amount,
        });
    }

    let id = reference
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| generate_id(id_prefixes::DEPOSIT));

    Ok(Transaction {
        id,
        transaction_type: TransactionType::Deposit,
        amount,
        status: TransactionStatus::Pending,
        date: now,
        method: Some(method.to_string()),
    })
}
