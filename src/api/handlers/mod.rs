pub mod assets;
pub mod health;
pub mod pages;
pub mod proxy;
pub mod user_info;

// common functions for the handlers
use axum::{
    http::{
        header::{COOKIE, LOCATION},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use secrecy::SecretString;

/// Cookie carrying the backend-issued session token.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/home";

/// Read the session token from the request cookies.
///
/// Returns `None` when the cookie is missing or empty.
pub fn extract_session_token(headers: &HeaderMap) -> Option<SecretString> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == SESSION_COOKIE_NAME && !val.trim().is_empty())
                .then(|| SecretString::from(val.trim().to_string()))
        })
}

/// `302 Found` to `location`.
pub fn found(location: &'static str) -> Response {
    (
        StatusCode::FOUND,
        [(LOCATION, HeaderValue::from_static(location))],
    )
        .into_response()
}
