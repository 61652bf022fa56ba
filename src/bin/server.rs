use std::{
    error::Error,
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{AppState, Database, build_router, graceful_shutdown};

/// The REST API server for tracking expenses against a monthly spending limit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH", default_value = "expenses.db")]
    db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// The address to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// File path to write debug logs to.
    #[arg(long, env = "LOG_PATH", default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine, the environment and flags still apply.
    dotenvy::dotenv().ok();

    let args = Args::parse();
    setup_logging(&args.log_path)?;

    let database = open_database(&args.db_path)?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(AppState::new(database)));
    let addr = SocketAddr::from((args.host, args.port));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Open the database at `db_path` and create its tables if needed.
fn open_database(db_path: &Path) -> Result<Database, Box<dyn Error>> {
    let database = Database::open(db_path);
    if let Err(error) = database.connect() {
        tracing::error!("Could not open database at {db_path:?}: {error}");
        return Err(error.into());
    }

    Ok(database)
}

fn setup_logging(log_path: &Path) -> Result<(), std::io::Error> {
    let stdout_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
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
        // Errors are already logged when they are turned into responses.
        .on_failure(());

    router.layer(tracing_layer)
}

#[cfg(test)]
mod open_database_tests {
    use std::path::Path;

    use super::open_database;

    #[test]
    fn opens_database() {
        assert!(open_database(Path::new(":memory:")).is_ok());
    }

    #[test]
    fn reports_unopenable_path_as_error() {
        let result = open_database(Path::new("/this/directory/does/not/exist/expenses.db"));

        let error = result.expect_err("Opening a database in a missing directory should fail");
        assert!(error.to_string().starts_with("could not open the database"));
    }
}
