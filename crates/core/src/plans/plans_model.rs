//! Plan domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::plans_constants::{DEFAULT_PLANS, DEFAULT_PLAN_DURATION_DAYS};
use crate::errors::{Error, Result, ValidationError};

/// Catalog identifier of a plan.
pub type PlanId = u32;

/// A fixed-price, fixed-duration product with a promised daily return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub price: Decimal,
    pub daily_return: Decimal,
    /// Duration in days
    pub duration: u32,
    pub name: String,
}

impl Plan {
    /// Return promised over the whole duration. Display only; nothing pays it out.
    pub fn total_return(&self) -> Decimal {
        self.daily_return.saturating_mul(Decimal::from(self.duration))
    }
}

/// Ordered, read-only list of plans with lookup by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    /// Builds a catalog, rejecting duplicate ids and non-positive prices.
    pub fn new(plans: Vec<Plan>) -> Result<Self> {
        for (idx, plan) in plans.iter().enumerate() {
            if plan.price <= Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Plan {} must have a positive price",
                    plan.id
                ))));
            }
            if plan.daily_return.is_sign_negative() {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Plan {} cannot have a negative daily return",
                    plan.id
                ))));
            }
            if plans[..idx].iter().any(|p| p.id == plan.id) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Duplicate plan id {}",
                    plan.id
                ))));
            }
        }
        Ok(Self { plans })
    }

    pub fn get(&self, id: PlanId) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        let plans = DEFAULT_PLANS
            .iter()
            .map(|&(id, price, daily_return, name)| Plan {
                id,
                price: Decimal::from(price),
                daily_return: Decimal::from(daily_return),
                duration: DEFAULT_PLAN_DURATION_DAYS,
                name: name.to_string(),
            })
            .collect();
        Self { plans }
    }
}
