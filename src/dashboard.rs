//! The monthly dashboard: a month's expenses, their total and whether the
//! spending limit has been exceeded.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime};

use crate::{
    AppState, Error,
    app_config::{AppConfigStore, SQLiteAppConfigStore},
    expense::{Expense, ExpenseStore, SQLiteExpenseStore, parse_month, parse_year},
    extract::QueryParams,
};

/// The dashboard summary for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// The expenses dated within the month, most recent first.
    #[serde(rename = "dashBoardData")]
    pub expenses: Vec<Expense>,
    /// The sum of the month's expense amounts.
    #[serde(rename = "monthlyTotalExpense")]
    pub monthly_total: f64,
    /// Whether the total is above the configured share of the spending limit.
    #[serde(rename = "hasExceedExpenseLimit")]
    pub has_exceeded_limit: bool,
}

/// Compute the dashboard summary for `month` of `year`.
///
/// # Errors
/// Returns [Error::MissingAppConfig] if no spending limit has been set up, or
/// [Error::MissingAppConfigField] if it is only partially set.
pub fn get_dashboard_data(
    year: i32,
    month: Month,
    expense_store: &impl ExpenseStore,
    app_config_store: &impl AppConfigStore,
) -> Result<DashboardSummary, Error> {
    let (expenses, monthly_total) = expense_store.find_by_month_with_total(year, month)?;
    let app_config = app_config_store.get()?.ok_or(Error::MissingAppConfig)?;
    let has_exceeded_limit = app_config.is_exceeded_by(monthly_total)?;

    Ok(DashboardSummary {
        expenses,
        monthly_total,
        has_exceeded_limit,
    })
}

/// The query string for the dashboard. Missing values default to the current UTC month.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    month: Option<String>,
    year: Option<String>,
}

impl DashboardQuery {
    fn resolve(&self, today: OffsetDateTime) -> Result<(i32, Month), Error> {
        let month = match self.month.as_deref() {
            Some(raw_month) => parse_month(raw_month)?,
            None => today.month(),
        };
        let year = match self.year.as_deref() {
            Some(raw_year) => parse_year(raw_year)?,
            None => today.year(),
        };

        Ok((year, month))
    }
}

/// The state needed for the dashboard endpoint.
#[derive(Debug, Clone)]
pub struct DashboardEndpointState {
    /// The store for expenses.
    pub expense_store: SQLiteExpenseStore,
    /// The store for the spending limit.
    pub app_config_store: SQLiteAppConfigStore,
}

impl FromRef<AppState> for DashboardEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: SQLiteExpenseStore::new(state.database.clone()),
            app_config_store: SQLiteAppConfigStore::new(state.database.clone()),
        }
    }
}

/// Get the dashboard summary for `?month=&year=`.
pub async fn get_dashboard_endpoint(
    State(state): State<DashboardEndpointState>,
    QueryParams(query): QueryParams<DashboardQuery>,
) -> Result<Json<DashboardSummary>, Error> {
    let (year, month) = query.resolve(OffsetDateTime::now_utc())?;
    tracing::debug!("Building dashboard for {month} {year}");

    get_dashboard_data(year, month, &state.expense_store, &state.app_config_store).map(Json)
}


#[cfg(test)]
mod dashboard_query_tests {
    use time::{Month, macros::datetime};

    use crate::Error;

    use super::DashboardQuery;

    #[test]
    fn defaults_to_current_month() {
        let query = DashboardQuery::default();

        assert_eq!(
            query.resolve(datetime!(2025-07-15 10:00 UTC)),
            Ok((2025, Month::July))
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let query = DashboardQuery {
            month: Some("2".to_owned()),
            year: None,
        };

        assert_eq!(
            query.resolve(datetime!(2025-07-15 10:00 UTC)),
            Ok((2025, Month::February))
        );
    }

    #[test]
    fn invalid_month_is_rejected() {
        let query = DashboardQuery {
            month: Some("13".to_owned()),
            year: Some("2025".to_owned()),
        };

        assert_eq!(
            query.resolve(datetime!(2025-07-15 10:00 UTC)),
            Err(Error::InvalidMonth("13".to_owned()))
        );
    }
}
