//! The shared database handle and schema set-up.
//!
//! A [Database] is created once by the application bootstrap and cloned into
//! every store. The underlying SQLite connection is opened on first use and
//! then reused for the rest of the process lifetime.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, app_config::create_app_config_table, expense::create_expense_table,
    master_data::create_master_data_table,
};

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A database file on disk, created if it does not exist.
    File(PathBuf),
    /// A private, in-memory database. Used for tests.
    InMemory,
}

/// A lazily opened, shared connection to the application database.
///
/// Cloning a [Database] is cheap and every clone refers to the same
/// connection.
#[derive(Debug, Clone)]
pub struct Database {
    location: DatabaseLocation,
    connection: Arc<Mutex<Option<Connection>>>,
}

impl Database {
    /// Create a handle for the database at `location` without connecting to it.
    pub fn new(location: DatabaseLocation) -> Self {
        Self {
            location,
            connection: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a handle for the database file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(DatabaseLocation::File(path.into()))
    }

    /// Create a handle for a new in-memory database.
    pub fn in_memory() -> Self {
        Self::new(DatabaseLocation::InMemory)
    }

    /// The location this handle connects to.
    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    /// Whether the connection has been opened yet.
    pub fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .map(|connection| connection.is_some())
            .unwrap_or(false)
    }

    /// Open the connection if it is not already open.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the tables cannot
    /// be created.
    pub fn connect(&self) -> Result<(), Error> {
        self.with_connection(|_| Ok(()))
    }

    /// Run `operation` with the shared connection, opening it first if needed.
    ///
    /// The connection is locked for the duration of `operation`.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned,
    /// [Error::DatabaseConnectionError] if the connection cannot be opened,
    /// or any error returned by `operation`.
    pub fn with_connection<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        if connection.is_none() {
            *connection = Some(self.open_connection()?);
        }

        match connection.as_ref() {
            Some(connection) => operation(connection),
            None => Err(Error::DatabaseConnectionError(
                "connection missing after opening".to_owned(),
            )),
        }
    }

    fn open_connection(&self) -> Result<Connection, Error> {
        let connection = match &self.location {
            DatabaseLocation::File(path) => Connection::open(path),
            DatabaseLocation::InMemory => Connection::open_in_memory(),
        }
        .map_err(|error| {
            tracing::error!("Database connection failed: {error}");
            Error::DatabaseConnectionError(error.to_string())
        })?;

        initialize(&connection)?;

        match &self.location {
            DatabaseLocation::File(path) => tracing::info!("Connected to database at {path:?}"),
            DatabaseLocation::InMemory => tracing::info!("Connected to in-memory database"),
        }

        Ok(connection)
    }
}

/// Create all application tables that do not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_master_data_table(&transaction)?;
    create_expense_table(&transaction)?;
    create_app_config_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
