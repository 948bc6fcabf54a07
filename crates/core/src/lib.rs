//! Planledger Core - balance allocation and withdrawal eligibility.
//!
//! This crate holds the session account, its three money pools, the plan
//! catalog and the transaction log, plus the pure transitions that move money
//! between them. Front-ends drive a [`LedgerService`] and render the
//! notifications it emits.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod payments;
pub mod plans;
pub mod policy;
pub mod transactions;
pub mod utils;

pub use accounts::{Account, ActivePlan, Pool};
pub use ledger::{LedgerService, LedgerSnapshot, LedgerState};
pub use plans::{Plan, PlanCatalog, PlanId};
pub use policy::{LedgerPolicy, WithdrawWindow};
pub use transactions::{Transaction, TransactionLog, TransactionStatus, TransactionType};
pub use utils::{Clock, FixedClock, SystemClock};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
