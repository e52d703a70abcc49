//! Sale totals for a month.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    stores::{NumericField, TransactionStore},
    transaction::build_filter,
};

/// The sale totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of the transactions in the month.
    pub total_sale_amount: f64,
    /// The number of transactions in the month.
    ///
    /// Note that this counts every transaction in the month, sold or not.
    pub total_items_sold: u64,
    /// The number of transactions in the month that have not been sold.
    pub total_not_sold: u64,
}

/// Get the sale totals for `month` of any year, or for all time if `month` is `None`.
///
/// # Errors
/// Returns any error raised by the store.
pub fn get_statistics<S: TransactionStore>(
    store: &S,
    month: Option<Month>,
) -> Result<Statistics, Error> {
    let predicate = build_filter(month, None);

    let total_sale_amount = store.aggregate_sum(&predicate, NumericField::Price)?;
    let total_items_sold = store.count(&predicate)?;
    let total_not_sold = store.count(&predicate.with_sold(false))?;

    Ok(Statistics {
        total_sale_amount,
        total_items_sold,
        total_not_sold,
    })
}
