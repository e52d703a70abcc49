//! The API endpoints URIs.

/// The route to list, search and paginate transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the sale statistics of a month.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price range histogram.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the category breakdown.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for statistics, bar chart and pie chart in one response.
pub const COMBINED: &str = "/api/combined";
