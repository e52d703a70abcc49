//! Defines the route handler that lists, searches and paginates transactions.

use std::time::Duration;

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error, pagination::PaginationConfig, query_runner::run_query,
    stores::TransactionStore,
};

use super::{
    core::Transaction,
    filter::{build_filter, parse_month},
    query::list_transactions,
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState<S> {
    /// The store to query transactions from.
    pub transaction_store: S,
    /// Configuration for page numbers and sizes.
    pub pagination_config: PaginationConfig,
    /// How long the store query may run.
    pub query_timeout: Duration,
}

impl<S: Clone> FromRef<AppState<S>> for TransactionsState<S> {
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            pagination_config: state.pagination_config.clone(),
            query_timeout: state.query_timeout,
        }
    }
}

/// The query parameters for listing transactions.
///
/// Values are kept as raw text so that invalid input can be reported with a
/// helpful error instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// The month of sale, 1 to 12. Missing means every month.
    pub month: Option<String>,
    /// A price to match exactly, or text to find in titles and descriptions.
    pub search: Option<String>,
    /// The page number, counting from 1.
    pub page: Option<String>,
    /// The number of transactions per page.
    #[serde(rename = "perPage", alias = "per_page")]
    pub per_page: Option<String>,
}

/// List one page of the transactions matching the month and search text.
///
/// # Errors
/// Returns a validation error for a malformed month, page or page size, or
/// the error of the failed store query.
pub async fn get_transactions_endpoint<S>(
    State(state): State<TransactionsState<S>>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = parse_month(query.month.as_deref())?;
    let page = state.pagination_config.parse_page(query.page.as_deref())?;
    let page_size = state
        .pagination_config
        .parse_page_size(query.per_page.as_deref())?;
    let predicate = build_filter(month, query.search.as_deref());

    tracing::debug!("listing transactions page {page} ({page_size} per page) for {predicate:?}");

    let store = state.transaction_store;
    let transactions = run_query(state.query_timeout, move || {
        list_transactions(&store, &predicate, page, page_size)
    })
    .await?;

    Ok(Json(transactions))
}
