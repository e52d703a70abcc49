//! The number of transactions per category, used by the dashboard pie chart.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    stores::{GroupField, TransactionStore},
    transaction::build_filter,
};

/// The number of transactions in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// How many transactions have the category.
    pub count: u64,
}

/// Count the transactions of `month` per category, sorted by category name.
///
/// # Errors
/// Returns any error raised by the store.
pub fn get_category_distribution<S: TransactionStore>(
    store: &S,
    month: Option<Month>,
) -> Result<Vec<CategoryCount>, Error> {
    let predicate = build_filter(month, None);

    let mut categories: Vec<CategoryCount> = store
        .group_by(&predicate, GroupField::Category)?
        .into_iter()
        .map(|group| CategoryCount {
            category: group.key,
            count: group.count,
        })
        .collect();

    categories.sort_by(|a, b| a.category.cmp(&b.category));

    Ok(categories)
}
