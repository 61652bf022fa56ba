//! Conversions between `OffsetDateTime` and the Unix millisecond integers stored in SQLite.
//!
//! Storing instants as integers keeps range queries on dates exact down to the
//! millisecond, independent of how a text representation would sort.

use rusqlite::{Row, types::Type};
use time::OffsetDateTime;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Convert `date_time` to whole milliseconds since the Unix epoch, rounding down.
pub(crate) fn to_unix_millis(date_time: OffsetDateTime) -> i64 {
    date_time.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI) as i64
}

/// Convert milliseconds since the Unix epoch to a UTC date-time.
pub(crate) fn from_unix_millis(millis: i64) -> Result<OffsetDateTime, time::error::ComponentRange> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * NANOS_PER_MILLI)
}

/// The current time truncated to millisecond precision.
pub(crate) fn now() -> OffsetDateTime {
    let millis = to_unix_millis(OffsetDateTime::now_utc());

    // The current time is always in range.
    from_unix_millis(millis).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Read the column at `index` as a Unix millisecond timestamp.
pub(crate) fn get_timestamp(row: &Row, index: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let millis: i64 = row.get(index)?;

    from_unix_millis(millis).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(error))
    })
}

#[cfg(test)]
mod timestamp_tests {
    use time::macros::datetime;

    use super::{from_unix_millis, to_unix_millis};

    #[test]
    fn converts_to_and_from_millis() {
        let date_time = datetime!(2025-03-31 23:59:59.999 UTC);

        let millis = to_unix_millis(date_time);

        assert_eq!(millis, 1_743_465_599_999);
        assert_eq!(from_unix_millis(millis), Ok(date_time));
    }

    #[test]
    fn rounds_sub_millisecond_values_down() {
        let date_time = datetime!(2025-03-01 00:00:00.000999 UTC);

        assert_eq!(to_unix_millis(date_time), 1_740_787_200_000);
    }

    #[test]
    fn dates_before_epoch_round_down() {
        let date_time = datetime!(1969-12-31 23:59:59.9995 UTC);

        assert_eq!(to_unix_millis(date_time), -1);
    }
}
