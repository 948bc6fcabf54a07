//! Accounts module - the session account and its money pools.

mod accounts_model;


// Re-export the public interface
pub use accounts_model::{Account, ActivePlan, Pool};
