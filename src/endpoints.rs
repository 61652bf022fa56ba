//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expense/{expense_id}', use [format_endpoint].

/// The liveness probe.
pub const HEALTH: &str = "/api/health";
/// The route to list and create expenses.
pub const EXPENSES: &str = "/api/expense";
/// The route to access a single expense.
pub const EXPENSE: &str = "/api/expense/{expense_id}";
/// The route for the monthly dashboard summary.
pub const DASHBOARD: &str = "/api/expense/dashboard";
/// The route to list and create master data items.
pub const MASTER_DATA: &str = "/api/master-data";
/// The route to access a single master data item.
pub const MASTER_DATA_ITEM: &str = "/api/master-data/{master_data_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a name wrapped in braces, e.g. '{expense_id}' in
/// '/api/expense/{expense_id}'. Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
