//! Request extractors that reject with the app's JSON [Error] instead of plain text.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

/// Like [axum::Json], but a malformed body becomes [Error::InvalidJson].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// Like [axum::extract::Query], but a malformed query string becomes
/// [Error::InvalidQuery].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);
