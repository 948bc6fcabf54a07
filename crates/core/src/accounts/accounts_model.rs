//! Account domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::WITHDRAWAL_DEBIT_ORDER;
use crate::plans::PlanId;

/// One of the three independent money buckets on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pool {
    /// Withdrawable funds
    Balance,
    /// Non-withdrawable welcome credit, spent first on investments
    Bonus,
    /// Withdrawable earnings from referrals, settled outside the engine
    ReferralEarnings,
}

impl Pool {
    pub const ALL: [Pool; 3] = [Pool::Balance, Pool::Bonus, Pool::ReferralEarnings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pool::Balance => "balance",
            Pool::Bonus => "bonus",
            Pool::ReferralEarnings => "referralEarnings",
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchased plan. References the catalog by `plan_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlan {
    pub id: String,
    pub plan_id: PlanId,
    pub start_date: DateTime<Utc>,
    pub days_remaining: u32,
}

/// The single session user's account.
///
/// All three pools stay non-negative; the allocators in `ledger` are the only
/// code that debits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub phone: String,
    pub balance: Decimal,
    pub bonus: Decimal,
    pub referral_earnings: Decimal,
    pub has_invested: bool,
    pub active_plans: Vec<ActivePlan>,
}

impl Account {
    /// Fresh account holding only the welcome bonus.
    pub fn new(phone: impl Into<String>, welcome_bonus: Decimal) -> Self {
        Self {
            phone: phone.into(),
            bonus: welcome_bonus,
            ..Default::default()
        }
    }

    pub fn pool(&self, pool: Pool) -> Decimal {
        match pool {
            Pool::Balance => self.balance,
            Pool::Bonus => self.bonus,
            Pool::ReferralEarnings => self.referral_earnings,
        }
    }

    pub(crate) fn pool_mut(&mut self, pool: Pool) -> &mut Decimal {
        match pool {
            Pool::Balance => &mut self.balance,
            Pool::Bonus => &mut self.bonus,
            Pool::ReferralEarnings => &mut self.referral_earnings,
        }
    }

    /// Sum of the given pools, saturating at `Decimal::MAX`.
    ///
    /// Comparing the result against any representable amount gives the same
    /// answer as the exact sum would.
    pub fn sum_of(&self, pools: &[Pool]) -> Decimal {
        pools
            .iter()
            .fold(Decimal::ZERO, |acc, pool| acc.saturating_add(self.pool(*pool)))
    }

    /// Funds that may be withdrawn (bonus excluded).
    pub fn withdrawable(&self) -> Decimal {
        self.sum_of(&WITHDRAWAL_DEBIT_ORDER)
    }

    /// Funds that may be spent on a plan (all pools).
    pub fn total_liquidity(&self) -> Decimal {
        self.sum_of(&Pool::ALL)
    }

    /// Checks that no pool is negative and that the pools sum without
    /// overflowing.
    pub fn validate(&self) -> Result<()> {
        for pool in Pool::ALL {
            if self.pool(pool) < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::NegativePool(
                    pool.as_str().to_string(),
                )));
            }
        }
        self.checked_total().map(|_| ())
    }

    /// Adds externally settled funds to a pool.
    ///
    /// Leaves the account unchanged when the pool, or the sum of all pools,
    /// would no longer fit in a `Decimal`.
    pub fn credit(&mut self, pool: Pool, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(
                amount,
            )));
        }
        let previous = self.pool(pool);
        let credited = previous
            .checked_add(amount)
            .ok_or(Error::Validation(ValidationError::AmountOutOfRange))?;
        *self.pool_mut(pool) = credited;
        if let Err(err) = self.checked_total() {
            *self.pool_mut(pool) = previous;
            return Err(err);
        }
        Ok(())
    }

    fn checked_total(&self) -> Result<Decimal> {
        Pool::ALL
            .iter()
            .try_fold(Decimal::ZERO, |acc, pool| acc.checked_add(self.pool(*pool)))
            .ok_or(Error::Validation(ValidationError::AmountOutOfRange))
    }
}
