//! The expense store trait and its SQLite implementation.

use rusqlite::{Connection, OptionalExtension, Row, params};
use time::Month;

use crate::{
    Error,
    db::Database,
    expense::{Expense, ExpenseFilter, ExpenseId, ExpenseUpdate, MonthRange, NewExpense},
    timestamp::{get_timestamp, now, to_unix_millis},
};

/// Creates, retrieves, updates and deletes expenses.
pub trait ExpenseStore {
    /// Get all expenses, most recent date first.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// Get the expense with `id`, or `None` if there is no such expense.
    fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, Error>;

    /// Create an expense and return it with its generated ID and timestamps.
    fn create(&self, new_expense: NewExpense) -> Result<Expense, Error>;

    /// Apply the provided fields of `update` to the expense with `id`.
    ///
    /// Returns `None` if no expense has `id`.
    fn update(&self, id: ExpenseId, update: ExpenseUpdate) -> Result<Option<Expense>, Error>;

    /// Delete the expense with `id`. Returns whether an expense was removed.
    fn delete(&self, id: ExpenseId) -> Result<bool, Error>;

    /// Get the expenses dated within `month` of `year` (UTC), most recent first.
    fn find_by_month(&self, year: i32, month: Month) -> Result<Vec<Expense>, Error>;

    /// The sum of amounts of the expenses dated within `month` of `year`.
    ///
    /// Zero if there are no such expenses.
    fn monthly_total(&self, year: i32, month: Month) -> Result<f64, Error>;

    /// Get the expenses dated within `month` of `year` together with the sum
    /// of their amounts, read from the same snapshot of the store.
    fn find_by_month_with_total(
        &self,
        year: i32,
        month: Month,
    ) -> Result<(Vec<Expense>, f64), Error>;

    /// Get the expenses matching every set field of `filter`, most recent first.
    fn find_filtered(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error>;
}

/// Stores expenses in the `expense` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    database: Database,
}

impl SQLiteExpenseStore {
    /// Create a new expense store backed by `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

const SELECT_COLUMNS: &str =
    "id, expense_type, description, amount, date, created_at, updated_at";

impl ExpenseStore for SQLiteExpenseStore {
    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM expense ORDER BY date DESC, id DESC;"
                ))?
                .query_map([], map_expense_row)?
                .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
                .collect()
        })
    }

    fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, Error> {
        self.database.with_connection(|connection| {
            connection
                .prepare(&format!("SELECT {SELECT_COLUMNS} FROM expense WHERE id = :id;"))?
                .query_row(&[(":id", &id)], map_expense_row)
                .optional()
                .map_err(|error| error.into())
        })
    }

    fn create(&self, new_expense: NewExpense) -> Result<Expense, Error> {
        let timestamp = to_unix_millis(now());

        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "INSERT INTO expense (expense_type, description, amount, date, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                     RETURNING {SELECT_COLUMNS};"
                ))?
                .query_row(
                    params![
                        new_expense.expense_type,
                        new_expense.description,
                        new_expense.amount,
                        to_unix_millis(new_expense.date),
                        timestamp,
                    ],
                    map_expense_row,
                )
                .map_err(|error| error.into())
        })
    }

    fn update(&self, id: ExpenseId, update: ExpenseUpdate) -> Result<Option<Expense>, Error> {
        let timestamp = to_unix_millis(now());

        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "UPDATE expense SET
                        expense_type = COALESCE(?1, expense_type),
                        description = COALESCE(?2, description),
                        amount = COALESCE(?3, amount),
                        date = COALESCE(?4, date),
                        updated_at = ?5
                     WHERE id = ?6
                     RETURNING {SELECT_COLUMNS};"
                ))?
                .query_row(
                    params![
                        update.expense_type,
                        update.description,
                        update.amount,
                        update.date.map(to_unix_millis),
                        timestamp,
                        id,
                    ],
                    map_expense_row,
                )
                .optional()
                .map_err(|error| error.into())
        })
    }

    fn delete(&self, id: ExpenseId) -> Result<bool, Error> {
        self.database.with_connection(|connection| {
            let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

            Ok(rows_affected > 0)
        })
    }

    fn find_by_month(&self, year: i32, month: Month) -> Result<Vec<Expense>, Error> {
        let range = MonthRange::new(year, month)?;

        self.database
            .with_connection(|connection| query_month(connection, &range))
    }

    fn monthly_total(&self, year: i32, month: Month) -> Result<f64, Error> {
        let range = MonthRange::new(year, month)?;

        self.database
            .with_connection(|connection| sum_month(connection, &range))
    }

    fn find_by_month_with_total(
        &self,
        year: i32,
        month: Month,
    ) -> Result<(Vec<Expense>, f64), Error> {
        let range = MonthRange::new(year, month)?;

        self.database.with_connection(|connection| {
            let transaction = connection.unchecked_transaction()?;
            let expenses = query_month(&transaction, &range)?;
            let total = sum_month(&transaction, &range)?;
            transaction.commit()?;

            Ok((expenses, total))
        })
    }

    fn find_filtered(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        self.database.with_connection(|connection| {
            connection
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM expense
                     WHERE (?1 IS NULL OR expense_type = ?1)
                       AND (?2 IS NULL OR instr(lower(description), lower(?2)) > 0)
                       AND (?3 IS NULL OR date >= ?3)
                       AND (?4 IS NULL OR date <= ?4)
                     ORDER BY date DESC, id DESC;"
                ))?
                .query_map(
                    params![
                        filter.expense_type,
                        filter.description,
                        filter.start().map(to_unix_millis),
                        filter.end().map(to_unix_millis),
                    ],
                    map_expense_row,
                )?
                .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
                .collect()
        })
    }
}

/// Initialize the expense table.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            expense_type TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            date INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
    )?;

    Ok(())
}

fn query_month(connection: &Connection, range: &MonthRange) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM expense
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date DESC, id DESC;"
        ))?
        .query_map(
            (to_unix_millis(range.start), to_unix_millis(range.end)),
            map_expense_row,
        )?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

fn sum_month(connection: &Connection, range: &MonthRange) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM expense WHERE date BETWEEN ?1 AND ?2",
            (to_unix_millis(range.start), to_unix_millis(range.end)),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        expense_type: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        date: get_timestamp(row, 4)?,
        created_at: get_timestamp(row, 5)?,
        updated_at: get_timestamp(row, 6)?,
    })
}
