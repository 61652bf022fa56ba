//! Optional filters for the expense list.

use serde::Deserialize;
use time::{Date, OffsetDateTime, macros::time};

use crate::{Error, expense::domain::DATE_FORMAT};

/// The query string accepted by the expense list endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilterQuery {
    /// Only list expenses with this expense type ID.
    #[serde(rename = "type")]
    pub expense_type: Option<String>,
    /// Only list expenses whose description contains this text, ignoring case.
    pub description: Option<String>,
    /// Only list expenses on or after this date (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Only list expenses on or before this date (`YYYY-MM-DD`).
    pub date_to: Option<String>,
}

/// A parsed expense filter. Every `None` field matches all expenses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Exact expense type ID.
    pub expense_type: Option<String>,
    /// Case-insensitive description substring.
    pub description: Option<String>,
    /// First day to include.
    pub date_from: Option<Date>,
    /// Last day to include.
    pub date_to: Option<Date>,
}

impl ExpenseFilter {
    /// Whether the filter matches every expense.
    pub fn is_empty(&self) -> bool {
        self.expense_type.is_none()
            && self.description.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// The first instant covered by `date_from`.
    pub fn start(&self) -> Option<OffsetDateTime> {
        self.date_from.map(|date| date.midnight().assume_utc())
    }

    /// The last millisecond covered by `date_to`.
    pub fn end(&self) -> Option<OffsetDateTime> {
        self.date_to
            .map(|date| date.with_time(time!(23:59:59.999)).assume_utc())
    }
}

impl TryFrom<ExpenseFilterQuery> for ExpenseFilter {
    type Error = Error;

    fn try_from(query: ExpenseFilterQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            expense_type: non_empty(query.expense_type),
            description: non_empty(query.description),
            date_from: non_empty(query.date_from)
                .map(|date| parse_filter_date(&date))
                .transpose()?,
            date_to: non_empty(query.date_to)
                .map(|date| parse_filter_date(&date))
                .transpose()?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_filter_date(raw_date: &str) -> Result<Date, Error> {
    Date::parse(raw_date, DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(raw_date.to_owned()))
}

#[cfg(test)]
mod expense_filter_tests {
    use time::macros::{date, datetime};

    use crate::Error;

    use super::{ExpenseFilter, ExpenseFilterQuery};

    #[test]
    fn empty_query_gives_empty_filter() {
        let filter = ExpenseFilter::try_from(ExpenseFilterQuery::default()).unwrap();

        assert!(filter.is_empty());
    }

    #[test]
    fn blank_values_are_ignored() {
        let query = ExpenseFilterQuery {
            expense_type: Some("".to_owned()),
            description: Some("  ".to_owned()),
            ..Default::default()
        };

        let filter = ExpenseFilter::try_from(query).unwrap();

        assert!(filter.is_empty());
    }

    #[test]
    fn date_bounds_cover_whole_days() {
        let query = ExpenseFilterQuery {
            date_from: Some("2025-03-01".to_owned()),
            date_to: Some("2025-03-15".to_owned()),
            ..Default::default()
        };

        let filter = ExpenseFilter::try_from(query).unwrap();

        assert_eq!(filter.date_from, Some(date!(2025 - 03 - 01)));
        assert_eq!(filter.start(), Some(datetime!(2025-03-01 00:00 UTC)));
        assert_eq!(filter.end(), Some(datetime!(2025-03-15 23:59:59.999 UTC)));
    }

    #[test]
    fn end_of_last_supported_day_does_not_overflow() {
        let query = ExpenseFilterQuery {
            date_to: Some("9999-12-31".to_owned()),
            ..Default::default()
        };

        let filter = ExpenseFilter::try_from(query).unwrap();

        assert_eq!(filter.end(), Some(datetime!(9999-12-31 23:59:59.999 UTC)));
    }

    #[test]
    fn invalid_date_is_rejected() {
        let query = ExpenseFilterQuery {
            date_to: Some("yesterday".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            ExpenseFilter::try_from(query),
            Err(Error::InvalidDate("yesterday".to_owned()))
        );
    }
}
