//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - Route handlers for the transaction REST endpoints

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use core::{
    NewTransaction, Transaction, TransactionType, TransactionUpdate, create_transaction,
    create_transaction_table, delete_transaction, get_transaction, list_transactions,
    update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use list_endpoint::{get_transaction_endpoint, list_transactions_endpoint};
