//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The message sent to clients in place of internal error details.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// The errors that may occur in the application.
///
/// Every error maps to exactly one HTTP status code via [Error::status_code].
/// Handlers return this type directly and axum turns it into a
/// `{ "error": <message> }` response.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of an expense failed validation.
    ///
    /// The string lists every field error, separated by `". "`.
    #[error("{0}")]
    InvalidExpense(String),

    /// An empty string was used as a master data title.
    #[error("Title is required")]
    EmptyTitle,

    /// A path parameter could not be parsed as a record ID.
    ///
    /// Holds the raw value from the request path.
    #[error("Invalid record ID")]
    InvalidRecordId(String),

    /// A date in a query string could not be parsed.
    #[error("Invalid date \"{0}\", expected a date formatted as YYYY-MM-DD")]
    InvalidDate(String),

    /// The month in the dashboard query was not a number from 1 to 12.
    #[error("Invalid month \"{0}\", expected a number from 1 to 12")]
    InvalidMonth(String),

    /// The year in the dashboard query was not a valid calendar year.
    #[error("Invalid year \"{0}\"")]
    InvalidYear(String),

    /// The request body could not be parsed as the expected JSON object.
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    /// The query string could not be parsed.
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// The request body could not be read to the end.
    #[error("could not read the request body: {0}")]
    UnreadableRequestBody(String),

    /// No expense has the requested ID.
    #[error("Expense not found")]
    ExpenseNotFound,

    /// No master data item has the requested ID.
    #[error("Master data item not found")]
    MasterDataNotFound,

    /// The requested resource was not found.
    ///
    /// Used for unknown routes. Internally, this error may also occur when a
    /// query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The configuration record with the expense limit has not been set up.
    #[error("App config not found")]
    MissingAppConfig,

    /// The configuration record exists but one of its fields is not set.
    #[error("App config is missing the field \"{0}\"")]
    MissingAppConfigField(&'static str),

    /// A timestamp read from the database is outside the supported range.
    #[error("invalid timestamp {0} in the database")]
    InvalidTimestamp(i64),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The database connection could not be opened.
    #[error("could not open the database: {0}")]
    DatabaseConnectionError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A response body could not be buffered for logging.
    #[error("could not read the response body: {0}")]
    UnreadableResponseBody(String),
}

impl Error {
    /// The HTTP status code used when this error is sent to a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidExpense(_)
            | Error::EmptyTitle
            | Error::InvalidRecordId(_)
            | Error::InvalidDate(_)
            | Error::InvalidMonth(_)
            | Error::InvalidYear(_)
            | Error::InvalidJson(_)
            | Error::InvalidQuery(_)
            | Error::UnreadableRequestBody(_) => StatusCode::BAD_REQUEST,
            Error::ExpenseNotFound | Error::MasterDataNotFound | Error::NotFound => {
                StatusCode::NOT_FOUND
            }
            Error::MissingAppConfig
            | Error::MissingAppConfigField(_)
            | Error::InvalidTimestamp(_)
            | Error::SqlError(_)
            | Error::DatabaseConnectionError(_)
            | Error::DatabaseLockError
            | Error::UnreadableResponseBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message that is safe to show to the client.
    ///
    /// Database errors are replaced with [INTERNAL_SERVER_ERROR_MESSAGE], the
    /// full error is only written to the server logs.
    fn client_message(&self) -> String {
        match self {
            Error::InvalidTimestamp(_)
            | Error::SqlError(_)
            | Error::DatabaseConnectionError(_)
            | Error::DatabaseLockError
            | Error::UnreadableResponseBody(_) => INTERNAL_SERVER_ERROR_MESSAGE.to_owned(),
            error => error.to_string(),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("Error: {self}\n{self:#?}");
        } else {
            tracing::warn!("Request failed with {status_code}: {self}");
        }

        let body = Json(json!({
            "error": self.client_message(),
        }));

        (status_code, body).into_response()
    }
}
