//! `Cookie` request header parsing.
//!
//! Pairs are separated by `"; "` and split on the first `=`. Values are
//! percent-decoded; when a name repeats, the last occurrence wins.

use std::collections::HashMap;

use axum::http::{header, HeaderMap};
use thiserror::Error;

/// Name of the cookie carrying the bearer token.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    #[error("cookie '{0}' has malformed percent-encoding")]
    MalformedValue(String),
}

/// Parse a raw `Cookie` header value into a name -> decoded value map.
///
/// Pairs without an `=` are skipped.
pub fn parse_cookies(raw: &str) -> Result<HashMap<String, String>, CookieError> {
    let mut cookies = HashMap::new();

    for pair in raw.split("; ") {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };

        let decoded = urlencoding::decode(value)
            .map_err(|_| CookieError::MalformedValue(name.to_string()))?;

        cookies.insert(name.to_string(), decoded.into_owned());
    }

    Ok(cookies)
}

/// Extract the auth token cookie from request headers.
///
/// Returns `Ok(None)` when no cookie header is present or the token is empty.
/// Non-ASCII bytes elsewhere in the header are decoded lossily.
pub fn auth_token_from_headers(headers: &HeaderMap) -> Result<Option<String>, CookieError> {
    let Some(raw) = headers.get(header::COOKIE) else {
        return Ok(None);
    };

    let raw = String::from_utf8_lossy(raw.as_bytes());
    let mut cookies = parse_cookies(&raw)?;

    Ok(cookies.remove(AUTH_COOKIE).filter(|token| !token.is_empty()))
}
