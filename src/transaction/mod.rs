//! Sale transactions and the queries for listing them.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The filter builder that turns request parameters into a [Predicate]
//! - The paginated listing query and its route handler

mod core;
mod filter;
mod list_endpoint;
mod query;

pub use core::{
    TRANSACTION_COLUMNS, Transaction, TransactionBuilder, count_transactions, create_transaction,
    create_transaction_table, import_transactions, map_transaction_row,
};
pub use filter::{Predicate, SearchTerm, build_filter, parse_month};
pub use list_endpoint::get_transactions_endpoint;
pub use query::list_transactions;
