use std::{fs::OpenOptions, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use salesboard_rs::{
    PaginationConfig, build_router, create_app_state, graceful_shutdown, logging_middleware,
};

/// The REST API server for salesboard_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// The number of transactions per page when a request does not say.
    #[arg(long, default_value_t = 10)]
    page_size: u64,

    /// The largest number of transactions per page a request may ask for.
    #[arg(long, default_value_t = 100)]
    max_page_size: u64,

    /// How long a single database query may run, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    query_timeout_ms: u64,

    /// File path to write the debug log to.
    #[arg(long, default_value = "debug.log")]
    log_path: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open the database.");
    let pagination_config = PaginationConfig {
        default_page: 1,
        default_page_size: args.page_size,
        max_page_size: args.max_page_size,
    };
    let state = create_app_state(
        conn,
        pagination_config,
        Duration::from_millis(args.query_timeout_ms),
    )
    .expect("Could not initialize the database.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");

    tracing::info!("Server shut down.");
}

fn setup_logging(log_path: &str) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the error type
        // already logs them.
        .on_failure(());

    router.layer(tracing_layer)
}
