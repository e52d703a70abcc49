//! Implements a struct that holds the state of the REST server.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;

use crate::{
    Error, db::initialize, pagination::PaginationConfig, stores::sqlite::SQLiteTransactionStore,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// The store that answers transaction queries.
    pub transaction_store: S,

    /// The config that controls how to page through transactions.
    pub pagination_config: PaginationConfig,

    /// How long a single store query may run before the request fails.
    pub query_timeout: Duration,
}

impl<S> AppState<S> {
    /// Create a new [AppState] around an existing store.
    pub fn new(
        transaction_store: S,
        pagination_config: PaginationConfig,
        query_timeout: Duration,
    ) -> Self {
        Self {
            transaction_store,
            pagination_config,
            query_timeout,
        }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// The state takes ownership of `db_connection`, which is closed once the
/// state and all of its clones have been dropped. This function will modify
/// the database by adding the tables for the domain models if they do not
/// exist yet.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(
    db_connection: Connection,
    pagination_config: PaginationConfig,
    query_timeout: Duration,
) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let transaction_store = SQLiteTransactionStore::new(connection)?;

    Ok(AppState::new(
        transaction_store,
        pagination_config,
        query_timeout,
    ))
}
