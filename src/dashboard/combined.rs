//! Answers the statistics, bar chart and pie chart queries in one call.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, query_runner::run_query, stores::TransactionStore};

use super::{
    categories::{CategoryCount, get_category_distribution},
    price_buckets::{PriceBucket, get_price_buckets},
    statistics::{Statistics, get_statistics},
};

/// Everything the dashboard shows for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// The sale totals.
    pub statistics: Statistics,
    /// The transaction counts per price range.
    pub bar_chart: Vec<PriceBucket>,
    /// The transaction counts per category.
    pub pie_chart: Vec<CategoryCount>,
}

/// Run the statistics, price bucket and category queries for `month`
/// concurrently and return all three results.
///
/// Each query gets its own `timeout`.
///
/// # Errors
/// Returns the first error raised by any of the queries, in which case no
/// partial result is returned.
pub async fn get_combined<S>(
    store: S,
    month: Option<Month>,
    timeout: Duration,
) -> Result<CombinedData, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let statistics_store = store.clone();
    let buckets_store = store.clone();

    let (statistics, bar_chart, pie_chart) = tokio::try_join!(
        run_query(timeout, move || get_statistics(&statistics_store, month)),
        run_query(timeout, move || get_price_buckets(&buckets_store, month)),
        run_query(timeout, move || get_category_distribution(&store, month)),
    )?;

    Ok(CombinedData {
        statistics,
        bar_chart,
        pie_chart,
    })
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::{
        Error,
        dashboard::{
            categories::get_category_distribution, price_buckets::get_price_buckets,
            statistics::get_statistics,
        },
        query_runner::DEFAULT_QUERY_TIMEOUT,
        test_utils::{FlakyStore, Operation, create_test_store, march_scenario},
    };

    use super::get_combined;

    #[tokio::test]
    async fn matches_the_individual_queries() {
        let store = create_test_store(march_scenario());

        let got = get_combined(store.clone(), Some(Month::March), DEFAULT_QUERY_TIMEOUT)
            .await
            .unwrap();

        assert_eq!(
            got.statistics,
            get_statistics(&store, Some(Month::March)).unwrap()
        );
        assert_eq!(
            got.bar_chart,
            get_price_buckets(&store, Some(Month::March)).unwrap()
        );
        assert_eq!(
            got.pie_chart,
            get_category_distribution(&store, Some(Month::March)).unwrap()
        );
    }

    #[tokio::test]
    async fn fails_when_any_query_fails() {
        for failing in [Operation::Sum, Operation::BucketBy, Operation::GroupBy] {
            let store = FlakyStore {
                inner: create_test_store(march_scenario()),
                failing,
            };

            let got = get_combined(store, Some(Month::March), DEFAULT_QUERY_TIMEOUT).await;

            assert_eq!(
                got,
                Err(Error::DatabaseLockError),
                "want failure when {failing:?} fails"
            );
        }
    }
}
