//! Defines the transaction store trait.

use crate::{Error, Transaction, transaction::Predicate};

/// Answers read-only queries over the stored transactions.
///
/// Every method takes a [Predicate] that restricts which transactions the
/// query sees. Implementations must return results in a stable order so that
/// repeated queries against unchanged data give identical answers.
pub trait TransactionStore {
    /// Retrieve up to `limit` matching transactions after skipping the first
    /// `skip`, in the order they are stored.
    fn find(&self, predicate: &Predicate, skip: u64, limit: u64)
    -> Result<Vec<Transaction>, Error>;

    /// Count the matching transactions.
    fn count(&self, predicate: &Predicate) -> Result<u64, Error>;

    /// Sum `field` over the matching transactions, zero if none match.
    fn aggregate_sum(&self, predicate: &Predicate, field: NumericField) -> Result<f64, Error>;

    /// Count the matching transactions for each distinct value of `field`.
    ///
    /// Values with no matching transactions are not returned.
    fn group_by(&self, predicate: &Predicate, field: GroupField) -> Result<Vec<GroupCount>, Error>;

    /// Count the matching transactions whose `field` falls in each interval
    /// `[boundaries[i], boundaries[i + 1])`, with the last interval open-ended.
    ///
    /// `boundaries` must be sorted in increasing order and values below the
    /// first boundary are counted in the first interval. Results are ordered
    /// by interval and intervals with no matching transactions are not
    /// returned.
    fn bucket_by(
        &self,
        predicate: &Predicate,
        field: NumericField,
        boundaries: &[f64],
    ) -> Result<Vec<BucketCount>, Error>;
}

/// The numeric fields of a transaction that can be summed or bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    /// The listed price.
    Price,
}

/// The fields of a transaction that can be grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    /// The category label.
    Category,
}

/// The number of transactions sharing a value of a [GroupField].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    /// The shared value.
    pub key: String,
    /// How many transactions have the value.
    pub count: u64,
}

/// The number of transactions in one interval of [TransactionStore::bucket_by].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketCount {
    /// The index of the interval's lower boundary.
    pub bucket: usize,
    /// How many transactions fall in the interval.
    pub count: u64,
}
