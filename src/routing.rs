//! Application router configuration.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    dashboard::{
        get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    stores::TransactionStore,
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
///
/// Every route is read-only and may be called from any origin.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint::<S>))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint::<S>))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint::<S>))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint::<S>))
        .route(endpoints::COMBINED, get(get_combined_endpoint::<S>))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
