//! Dashboard module
//!
//! Aggregate views over the transactions of a month. This module contains:
//! - Sale totals
//! - Transaction counts per price range for the bar chart
//! - Transaction counts per category for the pie chart
//! - A combined view that runs all three concurrently
//! - The HTTP handlers for each view

mod categories;
mod combined;
mod handlers;
mod price_buckets;
mod statistics;

pub use categories::{CategoryCount, get_category_distribution};
pub use combined::{CombinedData, get_combined};
pub use handlers::{
    get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
    get_statistics_endpoint,
};
pub use price_buckets::{PRICE_BOUNDARIES, PriceBucket, get_price_buckets};
pub use statistics::{Statistics, get_statistics};
