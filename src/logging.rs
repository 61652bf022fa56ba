//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body, in bytes, that is buffered for logging.
///
/// Matches axum's default body limit for the JSON extractor.
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level.
///
/// Requests with a body over [MAX_REQUEST_BODY_SIZE] bytes are rejected
/// before they reach a handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = match read_body_text(body, MAX_REQUEST_BODY_SIZE).await {
        Ok(body_text) => body_text,
        Err(error) => return Error::UnreadableRequestBody(error).into_response(),
    };
    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match read_body_text(body, usize::MAX).await {
        Ok(body_text) => body_text,
        Err(error) => return Error::UnreadableResponseBody(error).into_response(),
    };
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: Body, limit: usize) -> Result<String, String> {
    let body_bytes = to_bytes(body, limit)
        .await
        .map_err(|error| error.to_string())?;

    Ok(String::from_utf8_lossy(&body_bytes).to_string())
}

/// The longest prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character, or `None` if `body` already fits.
fn truncate_body(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Received request: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}

#[cfg(test)]
mod truncate_body_tests {
    use super::{LOG_BODY_LENGTH_LIMIT, truncate_body};

    #[test]
    fn short_body_is_not_truncated() {
        assert_eq!(truncate_body("{\"title\":\"Food\"}"), None);
        assert_eq!(truncate_body(&"a".repeat(LOG_BODY_LENGTH_LIMIT)), None);
    }

    #[test]
    fn long_body_is_cut_at_limit() {
        let body = "a".repeat(LOG_BODY_LENGTH_LIMIT + 10);

        assert_eq!(
            truncate_body(&body),
            Some(&body[..LOG_BODY_LENGTH_LIMIT])
        );
    }

    #[test]
    fn does_not_split_multibyte_characters() {
        // 'é' is two bytes, so the limit falls inside the last one.
        let body = format!("{}é{}", "a".repeat(LOG_BODY_LENGTH_LIMIT - 1), "b".repeat(8));

        let truncated = truncate_body(&body).expect("Body should be truncated");

        assert_eq!(truncated, "a".repeat(LOG_BODY_LENGTH_LIMIT - 1));
    }
}
