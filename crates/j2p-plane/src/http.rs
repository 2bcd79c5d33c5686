//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`PlaneError::Api`]) and JSON body decoding so the
//! endpoint modules stay focused on URLs and DTO mapping.

use serde::de::DeserializeOwned;

use crate::error::PlaneError;

/// Characters of an error body kept in [`PlaneError::Api`].
const ERROR_BODY_CHARS: usize = 200;

/// Characters of an unexpected body kept in diagnostics.
const SNIPPET_CHARS: usize = 120;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`PlaneError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`PlaneError::Api`] with status code and the
///   first 200 characters of the body.
pub async fn check_response(
    resp: reqwest::Response,
    method: &str,
) -> Result<reqwest::Response, PlaneError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(PlaneError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let body = resp.text().await.unwrap_or_default();
        return Err(PlaneError::Api {
            method: method.to_string(),
            url,
            status,
            message: truncate(&body, ERROR_BODY_CHARS),
        });
    }
    Ok(resp)
}

/// Decode a JSON body, rejecting responses not labelled as JSON.
pub async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    method: &str,
) -> Result<T, PlaneError> {
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let url = resp.url().to_string();
    let body = resp.text().await?;

    if !is_json_content_type(&content_type) {
        return Err(PlaneError::NonJson {
            method: method.to_string(),
            url,
            content_type,
            snippet: truncate(&body, SNIPPET_CHARS),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        PlaneError::Parse(format!(
            "{method} {url}: {e}; first bytes: {}",
            truncate(&body, SNIPPET_CHARS)
        ))
    })
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// First `max` characters of `text`.
fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
