use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::macros::datetime;

use crate::{
    Error, Transaction, TransactionBuilder,
    db::initialize,
    stores::{
        BucketCount, GroupCount, GroupField, NumericField, TransactionStore,
        sqlite::SQLiteTransactionStore,
    },
    transaction::{Predicate, import_transactions},
};

/// Create an in-memory SQLite store holding `builders`, inserted in order.
#[track_caller]
pub(crate) fn create_test_store(builders: Vec<TransactionBuilder>) -> SQLiteTransactionStore {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");
    import_transactions(builders, &connection).expect("Could not insert test transactions");

    SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
        .expect("Could not create transaction store")
}

/// One sold item at 50 and one unsold item at 250, both sold in March.
pub(crate) fn march_scenario() -> Vec<TransactionBuilder> {
    vec![
        Transaction::build("Coffee grinder", 50.0, datetime!(2022-03-05 10:00 UTC))
            .category("kitchen")
            .sold(true),
        Transaction::build("Espresso machine", 250.0, datetime!(2022-03-19 16:45 UTC))
            .category("kitchen")
            .sold(false),
    ]
}

/// A store method that [FlakyStore] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Find,
    Count,
    Sum,
    GroupBy,
    BucketBy,
}

/// Wraps a store and fails one kind of query with [Error::DatabaseLockError].
#[derive(Debug, Clone)]
pub(crate) struct FlakyStore<S> {
    pub inner: S,
    pub failing: Operation,
}

impl<S> FlakyStore<S> {
    fn check(&self, operation: Operation) -> Result<(), Error> {
        if self.failing == operation {
            Err(Error::DatabaseLockError)
        } else {
            Ok(())
        }
    }
}

impl<S: TransactionStore> TransactionStore for FlakyStore<S> {
    fn find(
        &self,
        predicate: &Predicate,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error> {
        self.check(Operation::Find)?;
        self.inner.find(predicate, skip, limit)
    }

    fn count(&self, predicate: &Predicate) -> Result<u64, Error> {
        self.check(Operation::Count)?;
        self.inner.count(predicate)
    }

    fn aggregate_sum(&self, predicate: &Predicate, field: NumericField) -> Result<f64, Error> {
        self.check(Operation::Sum)?;
        self.inner.aggregate_sum(predicate, field)
    }

    fn group_by(&self, predicate: &Predicate, field: GroupField) -> Result<Vec<GroupCount>, Error> {
        self.check(Operation::GroupBy)?;
        self.inner.group_by(predicate, field)
    }

    fn bucket_by(
        &self,
        predicate: &Predicate,
        field: NumericField,
        boundaries: &[f64],
    ) -> Result<Vec<BucketCount>, Error> {
        self.check(Operation::BucketBy)?;
        self.inner.bucket_by(predicate, field, boundaries)
    }
}
