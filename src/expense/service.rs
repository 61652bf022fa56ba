//! Business logic for expenses on top of an [ExpenseStore].

use crate::{
    Error,
    expense::{
        Expense, ExpenseFilter, ExpenseId, ExpenseInput, ExpenseStore, validate_expense_input,
        validate_expense_update,
    },
};

/// Get every expense, most recent date first.
fn get_expenses(store: &impl ExpenseStore) -> Result<Vec<Expense>, Error> {
    store.get_all()
}

/// Get a single expense.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if no expense has `id`.
pub fn get_expense_by_id(id: ExpenseId, store: &impl ExpenseStore) -> Result<Expense, Error> {
    store.find_by_id(id)?.ok_or(Error::ExpenseNotFound)
}

/// Get the expenses matching `filter`, most recent date first.
pub fn filter_expenses(
    filter: &ExpenseFilter,
    store: &impl ExpenseStore,
) -> Result<Vec<Expense>, Error> {
    if filter.is_empty() {
        get_expenses(store)
    } else {
        store.find_filtered(filter)
    }
}

/// Validate `input` and store it as a new expense.
///
/// # Errors
/// Returns [Error::InvalidExpense] if any field is missing or malformed.
pub fn create_expense(input: ExpenseInput, store: &impl ExpenseStore) -> Result<Expense, Error> {
    let new_expense = validate_expense_input(&input)?;

    store.create(new_expense)
}

/// Validate the provided fields of `input` and apply them to the expense with `id`.
///
/// # Errors
/// Returns [Error::InvalidExpense] if a provided field is malformed, or
/// [Error::ExpenseNotFound] if no expense has `id`.
pub fn update_expense(
    id: ExpenseId,
    input: ExpenseInput,
    store: &impl ExpenseStore,
) -> Result<Expense, Error> {
    let update = validate_expense_update(&input)?;

    store.update(id, update)?.ok_or(Error::ExpenseNotFound)
}

/// Delete the expense with `id`.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if no expense has `id`.
pub fn delete_expense(id: ExpenseId, store: &impl ExpenseStore) -> Result<(), Error> {
    if store.delete(id)? {
        Ok(())
    } else {
        Err(Error::ExpenseNotFound)
    }
}
