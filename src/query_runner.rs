//! Runs blocking store queries from async request handlers.

use std::time::Duration;

use crate::Error;

/// How long a single store query may run when no other limit is configured.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `query` on the blocking thread pool and wait at most `timeout` for it.
///
/// The store is synchronous, so running queries here keeps them from
/// stalling the async runtime. A query that times out keeps running in the
/// background until it finishes, but its result is discarded.
///
/// # Errors
/// Returns:
/// - [Error::QueryTimeout] if the query does not finish in time,
/// - [Error::QueryTaskFailed] if the query panics,
/// - or the query's own error.
pub async fn run_query<T, F>(timeout: Duration, query: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(query);

    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => {
            tracing::error!("query task failed: {join_error}");
            Err(Error::QueryTaskFailed(join_error.to_string()))
        }
        Err(_) => Err(Error::QueryTimeout(timeout)),
    }
}
