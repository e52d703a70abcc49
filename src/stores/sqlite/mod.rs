//! The SQLite backend for the stores.

mod transaction;

pub use transaction::SQLiteTransactionStore;
