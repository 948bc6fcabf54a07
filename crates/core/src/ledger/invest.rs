use chrono::{DateTime, Utc};

use super::allocation::{available_in, debit_in_order, INVESTMENT_DEBIT_ORDER};
use crate::accounts::{Account, ActivePlan};
use crate::constants::id_prefixes;
use crate::errors::InvestError;
use crate::plans::{PlanCatalog, PlanId};
use crate::transactions::generate_id;

/// Buys a plan from the catalog with the account's pooled funds.
///
/// All-or-nothing: when bonus, balance and referral earnings together cannot
/// cover the price, nothing is debited. Otherwise the cost is drawn from bonus,
/// then balance, then referral earnings, and the account is marked as invested.
///
/// No ledger transaction is written for an investment.
pub fn attempt_invest(
    account: &Account,
    plan_id: PlanId,
    catalog: &PlanCatalog,
    now: DateTime<Utc>,
) -> Result<(Account, ActivePlan), InvestError> {
    let plan = catalog
        .get(plan_id)
        .ok_or(InvestError::UnknownPlan(plan_id))?;

    let available = available_in(account, &INVESTMENT_DEBIT_ORDER);
    if available < plan.price {
        return Err(InvestError::InsufficientFunds {
            price: plan.price,
            available,
        });
    }

    let mut updated = account.clone();
    let uncovered = debit_in_order(&mut updated, &INVESTMENT_DEBIT_ORDER, plan.price);
    if !uncovered.is_zero() {
        return Err(InvestError::InsufficientFunds {
            price: plan.price,
            available,
        });
    }

    let active = ActivePlan {
        id: generate_id(id_prefixes::ACTIVE_PLAN),
        plan_id: plan.id,
        start_date: now,
        days_remaining: plan.duration,
    };
    updated.has_invested = true;
    updated.active_plans.push(active.clone());
    Ok((updated, active))
}
