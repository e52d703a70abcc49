//! HTTP handlers for the dashboard's aggregate views.

use std::time::Duration;

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error, query_runner::run_query, stores::TransactionStore,
    transaction::parse_month,
};

use super::{
    categories::{CategoryCount, get_category_distribution},
    combined::{CombinedData, get_combined},
    price_buckets::{PriceBucket, get_price_buckets},
    statistics::{Statistics, get_statistics},
};

/// The state needed by the dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState<S> {
    /// The store to aggregate transactions from.
    pub transaction_store: S,
    /// How long each store query may run.
    pub query_timeout: Duration,
}

impl<S: Clone> FromRef<AppState<S>> for DashboardState<S> {
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            query_timeout: state.query_timeout,
        }
    }
}

/// The month selected on the dashboard, 1 to 12. Missing means every month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    month: Option<String>,
}

/// Get the sale totals for the month.
pub async fn get_statistics_endpoint<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = parse_month(query.month.as_deref())?;
    let store = state.transaction_store;

    run_query(state.query_timeout, move || get_statistics(&store, month))
        .await
        .map(Json)
}

/// Get the transaction counts per price range for the month.
pub async fn get_bar_chart_endpoint<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceBucket>>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = parse_month(query.month.as_deref())?;
    let store = state.transaction_store;

    run_query(state.query_timeout, move || get_price_buckets(&store, month))
        .await
        .map(Json)
}

/// Get the transaction counts per category for the month.
pub async fn get_pie_chart_endpoint<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = parse_month(query.month.as_deref())?;
    let store = state.transaction_store;

    run_query(state.query_timeout, move || {
        get_category_distribution(&store, month)
    })
    .await
    .map(Json)
}

/// Get the statistics, bar chart and pie chart data for the month at once.
pub async fn get_combined_endpoint<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedData>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = parse_month(query.month.as_deref())?;

    tracing::debug!("building combined dashboard data for month {month:?}");

    get_combined(state.transaction_store, month, state.query_timeout)
        .await
        .map(Json)
}
