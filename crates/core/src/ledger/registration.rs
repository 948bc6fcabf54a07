use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::accounts::Account;
use crate::constants::id_prefixes;
use crate::transactions::{generate_id, Transaction, TransactionStatus, TransactionType};

/// Opens a fresh account holding only the welcome bonus.
///
/// The bonus is credited immediately, so its transaction is `Completed`,
/// unlike deposits and withdrawals which wait for manual settlement.
pub fn register(phone: &str, welcome_bonus: Decimal, now: DateTime<Utc>) -> (Account, Transaction) {
    let account = Account::new(phone.trim(), welcome_bonus);
    let bonus_tx = Transaction {
        id: generate_id(id_prefixes::BONUS),
        transaction_type: TransactionType::Bonus,
        amount: welcome_bonus,
        status: TransactionStatus::Completed,
        date: now,
        method: None,
    };
    (account, bonus_tx)
}
