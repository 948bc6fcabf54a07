//! Ledger module - pure transitions over the session account and the service
//! that applies them.

mod allocation;
mod deposit;
mod invest;
mod ledger_model;
mod ledger_service;
mod registration;
mod withdraw;

#[cfg(test)]
mod ledger_service_tests;

pub use allocation::{
    available_in, debit_in_order, INVESTMENT_DEBIT_ORDER, WITHDRAWAL_DEBIT_ORDER,
};
pub use deposit::validate_deposit;
pub use invest::attempt_invest;
pub use ledger_model::{LedgerSnapshot, LedgerState, SNAPSHOT_VERSION};
pub use ledger_service::LedgerService;
pub use registration::register;
pub use withdraw::attempt_withdraw;
