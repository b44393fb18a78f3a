use std::{
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

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

use pocketledger::{AppState, build_router, graceful_shutdown, logging_middleware};

/// The REST API server for pocketledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "POCKETLEDGER_DB_PATH", default_value = "pocketledger.db")]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "POCKETLEDGER_PORT", default_value_t = 5000)]
    port: u16,

    /// The IP address to listen on.
    #[arg(long, env = "POCKETLEDGER_ADDRESS", default_value = "127.0.0.1")]
    address: IpAddr,

    /// The canonical name of the local timezone, e.g. "Pacific/Auckland".
    ///
    /// Decides which month is the current month.
    #[arg(long, env = "POCKETLEDGER_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging();

    let addr = SocketAddr::from((args.address, args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open the database.");
    let app_state =
        AppState::new(conn, &args.timezone).expect("Could not initialize the application state.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(app_state).layer(middleware::from_fn(logging_middleware)),
    );

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

/// Log to stdout at the info level and to `debug.log` at the debug level.
///
/// Setting `RUST_LOG` overrides the level of the log file.
fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(filter::LevelFilter::INFO);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        );

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
        // Errors are logged where they happen.
        .on_failure(());

    router.layer(tracing_layer)
}
