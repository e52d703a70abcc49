//! Lists a page of the transactions that match a search.

use crate::{Error, pagination::page_offset, stores::TransactionStore};

use super::{core::Transaction, filter::Predicate};

/// Get the transactions on `page` of the transactions matching `predicate`.
///
/// Pages count from 1 and hold up to `page_size` transactions, in the order
/// the store keeps them. Pages past the last matching transaction are empty.
///
/// # Errors
/// Returns any error raised by the store.
pub fn list_transactions<S: TransactionStore>(
    store: &S,
    predicate: &Predicate,
    page: u64,
    page_size: u64,
) -> Result<Vec<Transaction>, Error> {
    store.find(predicate, page_offset(page, page_size), page_size)
}
