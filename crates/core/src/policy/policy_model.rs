//! Policy domain models.

use chrono::{Datelike, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MIN_DEPOSIT, MIN_WITHDRAWAL, REFERRAL_PERCENTAGE, WELCOME_BONUS, WITHDRAW_WINDOW_DAYS,
    WITHDRAW_WINDOW_END_HOUR, WITHDRAW_WINDOW_START_HOUR,
};
use crate::errors::{Error, Result};

/// Days and hours during which withdrawal requests are accepted.
///
/// Hours are local wall-clock hours, `start_hour` inclusive and `end_hour`
/// exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawWindow {
    pub days: Vec<Weekday>,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WithdrawWindow {
    /// Returns true if the given local time falls inside the window.
    pub fn contains<T: Datelike + Timelike>(&self, local: &T) -> bool {
        let hour = local.hour();
        self.days.contains(&local.weekday()) && hour >= self.start_hour && hour < self.end_hour
    }

    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(Error::InvalidConfigValue(
                "withdrawal window needs at least one day".to_string(),
            ));
        }
        if self.end_hour > 24 || self.start_hour >= self.end_hour {
            return Err(Error::InvalidConfigValue(format!(
                "withdrawal window hours {}..{} are not a valid range",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }
}

impl Default for WithdrawWindow {
    fn default() -> Self {
        Self {
            days: WITHDRAW_WINDOW_DAYS.to_vec(),
            start_hour: WITHDRAW_WINDOW_START_HOUR,
            end_hour: WITHDRAW_WINDOW_END_HOUR,
        }
    }
}

/// Limits consumed by the ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerPolicy {
    pub min_deposit: Decimal,
    pub min_withdrawal: Decimal,
    pub welcome_bonus: Decimal,
    /// Declared only; no accrual path reads it.
    pub referral_percentage: Decimal,
    pub withdraw_window: WithdrawWindow,
}

impl LedgerPolicy {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("minDeposit", self.min_deposit),
            ("minWithdrawal", self.min_withdrawal),
            ("welcomeBonus", self.welcome_bonus),
            ("referralPercentage", self.referral_percentage),
        ] {
            if value < Decimal::ZERO {
                return Err(Error::InvalidConfigValue(format!(
                    "{} cannot be negative ({})",
                    name, value
                )));
            }
        }
        self.withdraw_window.validate()
    }
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            min_deposit: MIN_DEPOSIT,
            min_withdrawal: MIN_WITHDRAWAL,
            welcome_bonus: WELCOME_BONUS,
            referral_percentage: REFERRAL_PERCENTAGE,
            withdraw_window: WithdrawWindow::default(),
        }
    }
}
