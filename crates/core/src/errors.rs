//! Core error types for the ledger engine.
//!
//! Every variant here is a recoverable rejection. Operations that fail leave
//! the account and the transaction log exactly as they were.

use chrono::Weekday;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::plans::PlanId;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Deposit rejected: {0}")]
    Deposit(#[from] DepositError),

    #[error("Withdrawal rejected: {0}")]
    Withdraw(#[from] WithdrawError),

    #[error("Investment rejected: {0}")]
    Invest(#[from] InvestError),

    #[error("No active session")]
    NoActiveSession,

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Rejections raised by the deposit validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepositError {
    #[error("amount {amount} is below the minimum deposit of {minimum}")]
    BelowMinimum { minimum: Decimal, amount: Decimal },

    #[error("reference '{0}' was already used by another transaction")]
    DuplicateReference(String),
}

/// Rejections raised by the withdrawal gates, in gate order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WithdrawError {
    #[error("withdrawals are only accepted between {start_hour}:00 and {end_hour}:00 on {days:?}")]
    OutsideWindow {
        days: Vec<Weekday>,
        start_hour: u32,
        end_hour: u32,
    },

    #[error("amount {amount} is below the minimum withdrawal of {minimum}")]
    BelowMinimum { minimum: Decimal, amount: Decimal },

    #[error("an investment is required before the first withdrawal")]
    NoInvestmentYet,

    #[error("requested {requested} but only {available} is withdrawable")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
}

/// Rejections raised by the investment allocator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvestError {
    #[error("plan {0} does not exist")]
    UnknownPlan(PlanId),

    #[error("plan costs {price} but only {available} is available")]
    InsufficientFunds { price: Decimal, available: Decimal },
}

/// Validation errors for caller input and restored state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Pool '{0}' would become negative")]
    NegativePool(String),

    #[error("Amount is too large for the account pools")]
    AmountOutOfRange,

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
