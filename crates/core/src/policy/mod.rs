//! Policy module - tunable limits and the withdrawal window.

mod policy_model;

pub use policy_model::{LedgerPolicy, WithdrawWindow};
