//! Calendar month boundaries used for monthly queries.

use time::{Date, Duration, Month, OffsetDateTime};

use crate::Error;

/// The instants covered by one calendar month in UTC, both ends inclusive.
///
/// `end` is one millisecond before the first instant of the next month, which
/// matches the precision of stored dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// Midnight UTC on the first day of the month.
    pub start: OffsetDateTime,
    /// The last millisecond of the last day of the month.
    pub end: OffsetDateTime,
}

impl MonthRange {
    /// Get the range for `month` of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if `year` is outside the supported range.
    pub fn new(year: i32, month: Month) -> Result<Self, Error> {
        let invalid_year = |_| Error::InvalidYear(year.to_string());

        let first_day = Date::from_calendar_date(year, month, 1).map_err(invalid_year)?;
        let first_day_of_next_month = match month {
            Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
            _ => Date::from_calendar_date(year, month.next(), 1),
        }
        .map_err(invalid_year)?;

        Ok(Self {
            start: first_day.midnight().assume_utc(),
            end: first_day_of_next_month.midnight().assume_utc() - Duration::MILLISECOND,
        })
    }

    /// Whether `date_time` falls inside the month.
    pub fn contains(&self, date_time: OffsetDateTime) -> bool {
        self.start <= date_time && date_time <= self.end
    }
}

/// Parse a month number from 1 to 12.
///
/// # Errors
/// Returns [Error::InvalidMonth] for anything else.
pub fn parse_month(raw_month: &str) -> Result<Month, Error> {
    raw_month
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .ok_or_else(|| Error::InvalidMonth(raw_month.to_owned()))
}

/// Parse a four digit calendar year.
///
/// # Errors
/// Returns [Error::InvalidYear] if `raw_year` is not a year from 1 to 9998.
pub fn parse_year(raw_year: &str) -> Result<i32, Error> {
    match raw_year.trim().parse::<i32>() {
        Ok(year) if (1..=9998).contains(&year) => Ok(year),
        _ => Err(Error::InvalidYear(raw_year.to_owned())),
    }
}
