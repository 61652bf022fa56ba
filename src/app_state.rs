//! Implements a struct that holds the state of the REST server.

use crate::db::Database;

/// The state of the REST server.
///
/// Endpoints do not take this directly, they take a narrower state built from
/// it with `FromRef`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The shared database handle.
    pub database: Database,
}

impl AppState {
    /// Create a new [AppState] around `database`.
    ///
    /// The database is not opened until the first request needs it.
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}
