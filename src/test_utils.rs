//! Helpers for endpoint tests.

#![allow(missing_docs)]

use axum_test::TestServer;

use crate::{AppState, build_router, db::Database};

/// A test server for the full router, backed by a fresh in-memory database.
pub(crate) fn get_test_server() -> TestServer {
    get_test_server_with_database(Database::in_memory())
}

/// A test server for the full router, backed by `database`.
///
/// Use this to seed records through the stores before making requests.
pub(crate) fn get_test_server_with_database(database: Database) -> TestServer {
    let app = build_router(AppState::new(database));

    TestServer::try_new(app).expect("Could not create test server.")
}
