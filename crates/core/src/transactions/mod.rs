//! Transactions module - the append-only, newest-first record log.

mod transactions_model;

pub use transactions_model::{
    generate_id, Transaction, TransactionLog, TransactionStatus, TransactionType,
};
