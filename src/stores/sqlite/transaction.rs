//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, functions::FunctionFlags, params_from_iter, types::Value};

use crate::{
    Error, Transaction,
    stores::{BucketCount, GroupCount, GroupField, NumericField, TransactionStore},
    transaction::{Predicate, SearchTerm, TRANSACTION_COLUMNS, map_transaction_row},
};

/// Stores transactions in a SQLite database.
///
/// The `transaction` table must already exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if the text search function cannot be registered.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Result<Self, Error> {
        let store = Self { connection };
        register_fold_case(&*store.lock()?)?;

        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Query for transactions in the database, ordered by ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is a SQL error.
    fn find(
        &self,
        predicate: &Predicate,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error> {
        let WhereClause {
            sql: where_clause,
            mut parameters,
        } = WhereClause::from_predicate(predicate);

        let query_string = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause} \
            ORDER BY id ASC LIMIT ?{} OFFSET ?{}",
            parameters.len() + 1,
            parameters.len() + 2,
        );
        parameters.push(Value::Integer(to_sql_integer(limit)));
        parameters.push(Value::Integer(to_sql_integer(skip)));

        self.lock()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Count the matching transactions in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is a SQL error.
    fn count(&self, predicate: &Predicate) -> Result<u64, Error> {
        let WhereClause {
            sql: where_clause,
            parameters,
        } = WhereClause::from_predicate(predicate);

        let query_string = format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}");

        let count: i64 = self.lock()?.query_row(
            &query_string,
            params_from_iter(parameters.iter()),
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    /// Sum a numeric column over the matching transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is a SQL error.
    fn aggregate_sum(&self, predicate: &Predicate, field: NumericField) -> Result<f64, Error> {
        let WhereClause {
            sql: where_clause,
            parameters,
        } = WhereClause::from_predicate(predicate);

        let query_string = format!(
            "SELECT COALESCE(SUM({}), 0.0) FROM \"transaction\" {where_clause}",
            numeric_column(field)
        );

        self.lock()?
            .query_row(
                &query_string,
                params_from_iter(parameters.iter()),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }

    /// Count the matching transactions per distinct column value, ordered by value.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is a SQL error.
    fn group_by(&self, predicate: &Predicate, field: GroupField) -> Result<Vec<GroupCount>, Error> {
        let WhereClause {
            sql: where_clause,
            parameters,
        } = WhereClause::from_predicate(predicate);
        let column = group_column(field);

        let query_string = format!(
            "SELECT {column}, COUNT(id) FROM \"transaction\" {where_clause} \
            GROUP BY {column} ORDER BY {column} ASC"
        );

        self.lock()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), |row| {
                Ok(GroupCount {
                    key: row.get(0)?,
                    count: row.get::<usize, i64>(1)? as u64,
                })
            })?
            .map(|maybe_group| maybe_group.map_err(Error::SqlError))
            .collect()
    }

    /// Count the matching transactions per interval of a numeric column.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is a SQL error.
    fn bucket_by(
        &self,
        predicate: &Predicate,
        field: NumericField,
        boundaries: &[f64],
    ) -> Result<Vec<BucketCount>, Error> {
        if boundaries.is_empty() {
            return Ok(Vec::new());
        }

        let WhereClause {
            sql: where_clause,
            mut parameters,
        } = WhereClause::from_predicate(predicate);
        let column = numeric_column(field);

        // Interval i holds values below boundaries[i + 1] that did not fit an earlier interval.
        let mut case_expression = String::from("CASE");
        for (bucket, upper_bound) in boundaries.iter().enumerate().skip(1) {
            parameters.push(Value::Real(*upper_bound));
            case_expression.push_str(&format!(
                " WHEN {column} < ?{} THEN {}",
                parameters.len(),
                bucket - 1
            ));
        }
        case_expression.push_str(&format!(" ELSE {} END", boundaries.len() - 1));

        let query_string = format!(
            "SELECT {case_expression} AS bucket, COUNT(id) FROM \"transaction\" {where_clause} \
            GROUP BY bucket ORDER BY bucket ASC"
        );

        self.lock()?
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), |row| {
                Ok(BucketCount {
                    bucket: row.get::<usize, i64>(0)? as usize,
                    count: row.get::<usize, i64>(1)? as u64,
                })
            })?
            .map(|maybe_bucket| maybe_bucket.map_err(Error::SqlError))
            .collect()
    }
}

/// A SQL `WHERE` clause and the values bound to its numbered parameters.
///
/// Parameters are numbered from `?1`, so callers appending their own
/// parameters should continue from `parameters.len() + 1`.
struct WhereClause {
    sql: String,
    parameters: Vec<Value>,
}

impl WhereClause {
    fn from_predicate(predicate: &Predicate) -> Self {
        let mut where_clause_parts = vec![];
        let mut parameters = vec![];

        if let Some(month) = predicate.month {
            parameters.push(Value::Integer(u8::from(month).into()));
            where_clause_parts.push(format!(
                "CAST(strftime('%m', date_of_sale) AS INTEGER) = ?{}",
                parameters.len()
            ));
        }

        match &predicate.search {
            Some(SearchTerm::Price(price)) => {
                parameters.push(Value::Real(*price));
                where_clause_parts.push(format!("price = ?{}", parameters.len()));
            }
            Some(SearchTerm::Text(text)) => {
                parameters.push(Value::Text(text.to_lowercase()));
                let index = parameters.len();
                where_clause_parts.push(format!(
                    "(instr({FOLD_CASE}(title), ?{index}) > 0 \
                    OR instr({FOLD_CASE}(description), ?{index}) > 0)"
                ));
            }
            None => {}
        }

        if let Some(sold) = predicate.sold {
            parameters.push(Value::Integer(sold.into()));
            where_clause_parts.push(format!("sold = ?{}", parameters.len()));
        }

        let sql = if where_clause_parts.is_empty() {
            String::new()
        } else {
            String::from("WHERE ") + &where_clause_parts.join(" AND ")
        };

        Self { sql, parameters }
    }
}

/// The SQL function that lower-cases text for case-insensitive search.
const FOLD_CASE: &str = "fold_case";

/// Register [FOLD_CASE] on `connection`.
///
/// SQLite's own `lower` and `LIKE` only fold ASCII letters, this folds any
/// Unicode letter.
fn register_fold_case(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        FOLD_CASE,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text = context.get::<String>(0)?;
            Ok(text.to_lowercase())
        },
    )
}

fn numeric_column(field: NumericField) -> &'static str {
    match field {
        NumericField::Price => "price",
    }
}

fn group_column(field: GroupField) -> &'static str {
    match field {
        GroupField::Category => "category",
    }
}

fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
