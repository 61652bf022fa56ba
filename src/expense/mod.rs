//! Expenses: recording, listing, filtering and monthly totals.

mod domain;
mod endpoints;
mod filter;
mod range;
mod service;
mod store;

pub use domain::{
    Expense, ExpenseId, ExpenseInput, ExpenseUpdate, NewExpense, validate_expense_input,
    validate_expense_update,
};
pub use endpoints::{
    create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
    get_expenses_endpoint, update_expense_endpoint,
};
pub use filter::{ExpenseFilter, ExpenseFilterQuery};
pub use range::{MonthRange, parse_month, parse_year};
pub use service::{
    create_expense, delete_expense, filter_expenses, get_expense_by_id, update_expense,
};
pub use store::{ExpenseStore, SQLiteExpenseStore, create_expense_table};
