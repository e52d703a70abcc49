//! Counts of transactions per price range, used by the dashboard bar chart.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    stores::{NumericField, TransactionStore},
    transaction::build_filter,
};

/// The lower bound of each price range. The last range has no upper bound.
pub const PRICE_BOUNDARIES: [f64; 10] = [
    0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0,
];

/// The number of transactions in one price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBucket {
    /// The price range, e.g. "100-200" or "900-above".
    pub bucket_label: String,
    /// How many transactions are priced in the range.
    pub count: u64,
}

/// Count the transactions of `month` in each price range, cheapest range first.
///
/// Each range includes its lower bound and excludes its upper bound. Ranges
/// without any transactions are left out.
///
/// # Errors
/// Returns any error raised by the store.
pub fn get_price_buckets<S: TransactionStore>(
    store: &S,
    month: Option<Month>,
) -> Result<Vec<PriceBucket>, Error> {
    let predicate = build_filter(month, None);

    let buckets = store
        .bucket_by(&predicate, NumericField::Price, &PRICE_BOUNDARIES)?
        .into_iter()
        .map(|bucket| PriceBucket {
            bucket_label: bucket_label(bucket.bucket),
            count: bucket.count,
        })
        .collect();

    Ok(buckets)
}

fn bucket_label(bucket: usize) -> String {
    match (PRICE_BOUNDARIES.get(bucket), PRICE_BOUNDARIES.get(bucket + 1)) {
        (Some(lower), Some(upper)) => format!("{lower}-{upper}"),
        (Some(lower), None) => format!("{lower}-above"),
        (None, _) => format!("bucket-{bucket}"),
    }
}
