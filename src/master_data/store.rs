//! The master data store trait and its SQLite implementation.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    db::Database,
    master_data::{MasterData, MasterDataId, Title},
    timestamp::{get_timestamp, now, to_unix_millis},
};

/// Creates, retrieves, updates and deletes master data items.
pub trait MasterDataStore {
    /// Get all items, newest first.
    fn get_all(&self) -> Result<Vec<MasterData>, Error>;

    /// Get the item with `id`, or `None` if there is no such item.
    fn find_by_id(&self, id: MasterDataId) -> Result<Option<MasterData>, Error>;

    /// Create an item and return it with its generated ID and timestamps.
    fn create(&self, title: Title) -> Result<MasterData, Error>;

    /// Change the title of the item with `id`.
    ///
    /// Returns `None` if no item has `id`.
    fn update(&self, id: MasterDataId, title: Title) -> Result<Option<MasterData>, Error>;

    /// Delete the item with `id`. Returns whether an item was removed.
    fn delete(&self, id: MasterDataId) -> Result<bool, Error>;
}

/// Stores master data in the `master_data` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteMasterDataStore {
    database: Database,
}

impl SQLiteMasterDataStore {
    /// Create a new master data store backed by `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

const SELECT_COLUMNS: &str = "id, title, created_at, updated_at";

impl MasterDataStore for SQLiteMasterDataStore {
    fn get_all(&self) -> Result<Vec<MasterData>, Error> {
        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM master_data ORDER BY created_at DESC, id DESC;"
                ))?
                .query_map([], map_master_data_row)?
                .map(|maybe_item| maybe_item.map_err(|error| error.into()))
                .collect()
        })
    }

    fn find_by_id(&self, id: MasterDataId) -> Result<Option<MasterData>, Error> {
        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM master_data WHERE id = :id;"
                ))?
                .query_row(&[(":id", &id)], map_master_data_row)
                .optional()
                .map_err(|error| error.into())
        })
    }

    fn create(&self, title: Title) -> Result<MasterData, Error> {
        let timestamp = to_unix_millis(now());

        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "INSERT INTO master_data (title, created_at, updated_at)
                     VALUES (?1, ?2, ?2)
                     RETURNING {SELECT_COLUMNS};"
                ))?
                .query_row((title.as_ref(), timestamp), map_master_data_row)
                .map_err(|error| error.into())
        })
    }

    fn update(&self, id: MasterDataId, title: Title) -> Result<Option<MasterData>, Error> {
        let timestamp = to_unix_millis(now());

        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "UPDATE master_data SET title = ?1, updated_at = ?2
                     WHERE id = ?3
                     RETURNING {SELECT_COLUMNS};"
                ))?
                .query_row((title.as_ref(), timestamp, id), map_master_data_row)
                .optional()
                .map_err(|error| error.into())
        })
    }

    fn delete(&self, id: MasterDataId) -> Result<bool, Error> {
        self.database.with_connection(|connection| {
            let rows_affected = connection.execute("DELETE FROM master_data WHERE id = ?1", [id])?;

            Ok(rows_affected > 0)
        })
    }
}

/// Initialize the master data table.
pub fn create_master_data_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS master_data (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_master_data_created_at ON master_data(created_at);",
    )?;

    Ok(())
}

fn map_master_data_row(row: &Row) -> Result<MasterData, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let title = Title::new_unchecked(&raw_title);
    let created_at = get_timestamp(row, 2)?;
    let updated_at = get_timestamp(row, 3)?;

    Ok(MasterData {
        id,
        title,
        created_at,
        updated_at,
    })
}
