//! Transaction storage and listing.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for records that are not stored yet
//! - Database functions for storing, replacing, and counting transactions
//! - The endpoint for listing a month's transactions with search and pagination

mod core;
mod list_endpoint;
mod query;

pub use core::{
    NewTransaction, Transaction, count_transactions, create_transaction,
    create_transaction_table, replace_all_transactions,
};
pub use list_endpoint::{TransactionList, get_transactions_endpoint};
