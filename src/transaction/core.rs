//! Defines the core data model and database functions for sale transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A product listing and whether it has been sold.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The name of the product.
    pub title: String,
    /// A text description of the product. May be empty.
    pub description: String,
    /// The listed price of the product, never negative.
    pub price: f64,
    /// The category label of the product, e.g. "electronics".
    pub category: String,
    /// Whether the product has been sold.
    pub sold: bool,
    /// When the sale was recorded, stored in UTC.
    ///
    /// Only the month of this date is used by queries, the year is ignored.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A link to a picture of the product, used for display only.
    pub image_url: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: String::new(),
            sold: false,
            date_of_sale,
            image_url: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The title, price and date of sale are required, everything else defaults
/// to an empty string or `false`. The builder is validated when it is
/// inserted with [create_transaction] or [import_transactions].
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// use crate::transaction::Transaction;
///
/// let builder = Transaction::build("Fjallraven Backpack", 109.95, datetime!(2021-11-27 20:29:54 +05:30))
///     .category("men's clothing")
///     .sold(true);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The name of the product, must not be empty.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price, must be zero or greater.
    pub price: f64,
    /// The category label of the product.
    pub category: String,
    /// Whether the product has been sold.
    pub sold: bool,
    /// When the sale was recorded. Converted to UTC when stored.
    pub date_of_sale: OffsetDateTime,
    /// A link to a picture of the product.
    pub image_url: String,
}

impl TransactionBuilder {
    /// Set the description of the product.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category of the product.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the product has been sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the link to the product picture.
    pub fn image_url(mut self, image_url: &str) -> Self {
        self.image_url = image_url.to_owned();
        self
    }

    /// Check the builder against the invariants of [Transaction].
    ///
    /// # Errors
    /// Returns [Error::EmptyTitle] if the title is empty or only whitespace,
    /// or [Error::NegativePrice] if the price is below zero or not a number.
    fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        // NaN fails this comparison too.
        if !(self.price >= 0.0) {
            return Err(Error::NegativePrice(self.price));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const INSERT_TRANSACTION: &str = "INSERT INTO \"transaction\" \
    (title, description, price, category, sold, date_of_sale, image_url)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    RETURNING id, title, description, price, category, sold, date_of_sale, image_url";

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTitle] or [Error::NegativePrice] if the builder is invalid,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    builder.validate()?;

    let transaction = connection
        .prepare(INSERT_TRANSACTION)?
        .query_row(insert_params(builder), map_transaction_row)?;

    Ok(transaction)
}

/// Insert many transactions at once.
///
/// Either every transaction is inserted or none are: all builders are
/// validated first and the inserts run inside a single SQL transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTitle] or [Error::NegativePrice] if any builder is invalid,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn import_transactions(
    builders: Vec<TransactionBuilder>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    builders.iter().try_for_each(TransactionBuilder::validate)?;

    let tx = connection.unchecked_transaction()?;
    let mut imported_transactions = Vec::with_capacity(builders.len());

    {
        let mut stmt = tx.prepare(INSERT_TRANSACTION)?;

        for builder in builders {
            let transaction = stmt.query_row(insert_params(builder), map_transaction_row)?;
            imported_transactions.push(transaction);
        }
    }

    tx.commit()?;

    Ok(imported_transactions)
}

type InsertParams = (String, String, f64, String, bool, OffsetDateTime, String);

fn insert_params(builder: TransactionBuilder) -> InsertParams {
    (
        builder.title,
        builder.description,
        builder.price,
        builder.category,
        builder.sold,
        builder.date_of_sale.to_offset(UtcOffset::UTC),
        builder.image_url,
    )
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|count| count as u64)
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                image_url TEXT NOT NULL
                )",
        (),
    )?;

    // Used by the category breakdown.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category);",
        (),
    )?;

    Ok(())
}

/// The columns expected by [map_transaction_row], in order.
pub const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale, image_url";

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = row.get(4)?;
    let sold = row.get(5)?;
    let date_of_sale = row.get(6)?;
    let image_url = row.get(7)?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        category,
        sold,
        date_of_sale,
        image_url,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::{UtcOffset, macros::datetime};

    use crate::{
        Error,
        db::initialize,
        transaction::{Transaction, count_transactions, create_transaction, import_transactions},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build("Mens Casual Slim Fit", 15.99, datetime!(2022-03-27 20:29:54 UTC))
                .description("The color could be slightly different")
                .category("men's clothing")
                .sold(true)
                .image_url("https://example.com/71YXzeOuslL.jpg"),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.id, 1);
                assert_eq!(transaction.title, "Mens Casual Slim Fit");
                assert_eq!(transaction.price, 15.99);
                assert_eq!(transaction.category, "men's clothing");
                assert!(transaction.sold);
                assert_eq!(transaction.date_of_sale, datetime!(2022-03-27 20:29:54 UTC));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_stores_date_in_utc() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            Transaction::build("Solid Gold Petite Micropave", 168.0, datetime!(2022-04-01 02:00 +5:30)),
            &conn,
        )
        .expect("Could not create transaction");

        assert_eq!(transaction.date_of_sale.offset(), UtcOffset::UTC);
        assert_eq!(transaction.date_of_sale, datetime!(2022-03-31 20:30 UTC));
    }

    #[test]
    fn create_fails_on_empty_title() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build("  ", 1.0, datetime!(2022-03-27 20:29:54 UTC)),
            &conn,
        );

        assert_eq!(result, Err(Error::EmptyTitle));
    }

    #[test]
    fn create_fails_on_negative_price() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build("Refund", -1.0, datetime!(2022-03-27 20:29:54 UTC)),
            &conn,
        );

        assert_eq!(result, Err(Error::NegativePrice(-1.0)));
    }

    #[test]
    fn import_inserts_all() {
        let conn = get_test_connection();
        let date = datetime!(2021-11-27 20:29:54 UTC);
        let builders = vec![
            Transaction::build("Backpack", 109.95, date),
            Transaction::build("T-Shirt", 22.3, date),
            Transaction::build("Jacket", 55.99, date),
        ];

        let imported = import_transactions(builders, &conn).expect("Could not import");

        assert_eq!(imported.len(), 3);
        assert_eq!(count_transactions(&conn), Ok(3));
    }

    #[test]
    fn import_is_all_or_nothing() {
        let conn = get_test_connection();
        let date = datetime!(2021-11-27 20:29:54 UTC);
        let builders = vec![
            Transaction::build("Backpack", 109.95, date),
            Transaction::build("", 22.3, date),
        ];

        let result = import_transactions(builders, &conn);

        assert_eq!(result, Err(Error::EmptyTitle));
        assert_eq!(count_transactions(&conn), Ok(0));
    }
}
