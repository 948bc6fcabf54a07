//! Plans module - the read-only catalog of fixed-return products.

mod plans_constants;
mod plans_model;

pub use plans_constants::*;
pub use plans_model::{Plan, PlanCatalog, PlanId};
