//! The spending limit configuration used by the dashboard.

use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::{Error, db::Database};

/// The monthly spending limit and the share of it that triggers a warning.
///
/// Both fields are optional in storage. The dashboard refuses to compute the
/// warning flag until both are set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// The monthly spending limit.
    pub max_expense_limit: Option<f64>,
    /// The percentage of the limit at which spending counts as exceeded.
    pub max_expense_percentage: Option<f64>,
}

impl AppConfig {
    /// Create a config with both fields set.
    pub fn new(max_expense_limit: f64, max_expense_percentage: f64) -> Self {
        Self {
            max_expense_limit: Some(max_expense_limit),
            max_expense_percentage: Some(max_expense_percentage),
        }
    }

    /// The amount above which monthly spending is flagged:
    /// `max_expense_limit * (max_expense_percentage / 100)`.
    ///
    /// # Errors
    /// Returns [Error::MissingAppConfigField] naming the first unset field.
    pub fn expense_threshold(&self) -> Result<f64, Error> {
        let limit = self
            .max_expense_limit
            .ok_or(Error::MissingAppConfigField("maxExpenseLimit"))?;
        let percentage = self
            .max_expense_percentage
            .ok_or(Error::MissingAppConfigField("maxExpensePercentage"))?;

        Ok(amount_by_percentage(limit, percentage))
    }

    /// Whether `monthly_total` is strictly greater than the threshold.
    pub fn is_exceeded_by(&self, monthly_total: f64) -> Result<bool, Error> {
        Ok(monthly_total > self.expense_threshold()?)
    }
}

/// `percentage` percent of `amount`.
pub fn amount_by_percentage(amount: f64, percentage: f64) -> f64 {
    amount * (percentage / 100.0)
}

/// Reads and writes the single [AppConfig] record.
pub trait AppConfigStore {
    /// Get the config, or `None` if it has never been set.
    fn get(&self) -> Result<Option<AppConfig>, Error>;

    /// Create or replace the config.
    fn set(&self, config: AppConfig) -> Result<AppConfig, Error>;
}

/// Stores the config as the only row of the `app_config` table.
#[derive(Debug, Clone)]
pub struct SQLiteAppConfigStore {
    database: Database,
}

impl SQLiteAppConfigStore {
    /// Create a new config store backed by `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl AppConfigStore for SQLiteAppConfigStore {
    fn get(&self) -> Result<Option<AppConfig>, Error> {
        self.database.with_connection(|connection| {
            connection
                .query_row(
                    "SELECT max_expense_limit, max_expense_percentage FROM app_config WHERE id = 1",
                    [],
                    |row| {
                        Ok(AppConfig {
                            max_expense_limit: row.get(0)?,
                            max_expense_percentage: row.get(1)?,
                        })
                    },
                )
                .optional()
                .map_err(|error| error.into())
        })
    }

    fn set(&self, config: AppConfig) -> Result<AppConfig, Error> {
        self.database.with_connection(|connection| {
            connection.execute(
                "INSERT INTO app_config (id, max_expense_limit, max_expense_percentage)
                 VALUES (1, ?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET
                    max_expense_limit = excluded.max_expense_limit,
                    max_expense_percentage = excluded.max_expense_percentage",
                (config.max_expense_limit, config.max_expense_percentage),
            )?;

            Ok(config)
        })
    }
}

/// Initialize the app config table.
pub fn create_app_config_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS app_config (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            max_expense_limit REAL,
            max_expense_percentage REAL
        )",
        (),
    )?;

    Ok(())
}


#[cfg(test)]
mod sqlite_app_config_store_tests {
    use crate::db::Database;

    use super::{AppConfig, AppConfigStore, SQLiteAppConfigStore};

    #[test]
    fn get_before_set_returns_none() {
        let store = SQLiteAppConfigStore::new(Database::in_memory());

        assert_eq!(store.get(), Ok(None));
    }

    #[test]
    fn set_replaces_existing_config() {
        let store = SQLiteAppConfigStore::new(Database::in_memory());

        store.set(AppConfig::new(1000.0, 80.0)).unwrap();
        store.set(AppConfig::new(500.0, 90.0)).unwrap();

        assert_eq!(store.get(), Ok(Some(AppConfig::new(500.0, 90.0))));
    }

    #[test]
    fn partial_config_round_trips() {
        let store = SQLiteAppConfigStore::new(Database::in_memory());
        let config = AppConfig {
            max_expense_limit: Some(1000.0),
            max_expense_percentage: None,
        };

        store.set(config).unwrap();

        assert_eq!(store.get(), Ok(Some(config)));
    }
}
