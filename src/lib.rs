//! An expense tracker REST API.
//!
//! Records expenses filed under user-defined expense types (master data) and
//! summarises each month's spending against a configurable limit. All data is
//! stored in a single SQLite database and served as JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_config;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod error;
mod expense;
mod extract;
mod logging;
mod master_data;
mod not_found;
mod routing;
#[cfg(test)]
mod test_utils;
mod timestamp;

pub use app_config::{AppConfig, AppConfigStore, SQLiteAppConfigStore, amount_by_percentage};
pub use app_state::AppState;
pub use dashboard::{DashboardSummary, get_dashboard_data};
pub use database_id::DatabaseId;
pub use db::{Database, DatabaseLocation, initialize as initialize_db};
pub use error::Error;
pub use expense::{Expense, ExpenseId, ExpenseStore, MonthRange, NewExpense, SQLiteExpenseStore};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use master_data::{MasterData, MasterDataId, MasterDataStore, SQLiteMasterDataStore, Title};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received ctrl+c signal, shutting down.");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
