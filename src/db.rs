/*! This module sets up the application's database. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, transaction::create_transaction_table};

/// Create all of the database tables for the application.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// This function may return an [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
