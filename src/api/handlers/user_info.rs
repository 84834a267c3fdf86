//! `/main`: the signed-in user's record.

use super::{extract_session_token, found, LOGIN_PATH, SESSION_COOKIE_NAME};
use crate::api::{display, error::AppError, templates, AppState};
use axum::{
    extract::Extension,
    http::{header::COOKIE, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Backend endpoint resolving the session cookie to a user.
pub const ME_PATH: &str = "me";

const TITLE: &str = "My account";

// axum handler for the user info page
#[instrument(skip_all)]
pub async fn user_info(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
) -> Result<Response, AppError> {
    let Some(token) = extract_session_token(&headers) else {
        debug!("No session cookie, redirecting to {LOGIN_PATH}");
        return Ok(found(LOGIN_PATH));
    };

    let mut cookie = HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={}",
        token.expose_secret()
    ))
    .map_err(AppError::internal)?;
    cookie.set_sensitive(true);

    let url = state
        .config()
        .backend_url(ME_PATH, None)
        .map_err(AppError::internal)?;

    let response = state
        .client()
        .get(url)
        .header(COOKIE, cookie)
        .timeout(state.config().backend_timeout())
        .send()
        .await
        .map_err(|err| AppError::from_upstream(&err))?;

    // Rejected and missing sessions look the same to the visitor.
    if !response.status().is_success() {
        debug!(
            "Backend rejected session ({}), redirecting to {LOGIN_PATH}",
            response.status()
        );
        return Ok(found(LOGIN_PATH));
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| AppError::from_upstream(&err))?;
    let mut user: Map<String, Value> = serde_json::from_slice(&body)
        .map_err(|err| AppError::internal(format!("unexpected /{ME_PATH} payload: {err}")))?;

    let timezone = state.config().timezone();
    display::decorate_user(&mut user, timezone);

    let html = state.templates().render(
        templates::USER_INFO,
        context! {
            title => TITLE,
            timezone => timezone.iana_name().unwrap_or("UTC"),
            user => user,
        },
    )?;

    Ok(Html(html).into_response())
}
