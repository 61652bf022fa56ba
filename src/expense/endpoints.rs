//! Route handlers for the expense API.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::{HeaderName, StatusCode, header},
};

use crate::{
    AppState, Error,
    database_id::validate_record_id,
    endpoints::{self, format_endpoint},
    expense::{
        Expense, ExpenseFilter, ExpenseFilterQuery, ExpenseInput, SQLiteExpenseStore,
        create_expense, delete_expense, filter_expenses, get_expense_by_id, update_expense,
    },
    extract::{JsonBody, QueryParams},
};

/// The state needed for the expense endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseEndpointState {
    /// The store for expenses.
    pub store: SQLiteExpenseStore,
}

impl FromRef<AppState> for ExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: SQLiteExpenseStore::new(state.database.clone()),
        }
    }
}

/// List expenses, optionally narrowed by `type`, `description`, `dateFrom` and `dateTo`.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseEndpointState>,
    QueryParams(query): QueryParams<ExpenseFilterQuery>,
) -> Result<Json<Vec<Expense>>, Error> {
    let filter = ExpenseFilter::try_from(query)?;

    filter_expenses(&filter, &state.store).map(Json)
}

/// Get one expense by ID.
pub async fn get_expense_endpoint(
    Path(raw_id): Path<String>,
    State(state): State<ExpenseEndpointState>,
) -> Result<Json<Expense>, Error> {
    let id = validate_record_id(&raw_id)?;

    get_expense_by_id(id, &state.store).map(Json)
}

/// Create an expense, responding with 201, the stored expense and its location.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseEndpointState>,
    JsonBody(input): JsonBody<ExpenseInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Expense>), Error> {
    let expense = create_expense(input, &state.store)?;
    tracing::debug!("Created expense {}", expense.id);

    let location = format_endpoint(endpoints::EXPENSE, expense.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(expense)))
}

/// Update the provided fields of an expense.
pub async fn update_expense_endpoint(
    Path(raw_id): Path<String>,
    State(state): State<ExpenseEndpointState>,
    JsonBody(input): JsonBody<ExpenseInput>,
) -> Result<Json<Expense>, Error> {
    let id = validate_record_id(&raw_id)?;

    update_expense(id, input, &state.store).map(Json)
}

/// Delete an expense, responding with 204 and no body.
pub async fn delete_expense_endpoint(
    Path(raw_id): Path<String>,
    State(state): State<ExpenseEndpointState>,
) -> Result<StatusCode, Error> {
    let id = validate_record_id(&raw_id)?;

    delete_expense(id, &state.store)?;
    tracing::debug!("Deleted expense {id}");

    Ok(StatusCode::NO_CONTENT)
}
