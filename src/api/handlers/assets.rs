//! Browser assets compiled into the binary.

use crate::api::error::AppError;
use axum::{
    extract::Path,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

const APP_JS: &str = include_str!("../../../static/js/app.js");

/// `(path below /static, content type, contents)`
const ASSETS: [(&str, &str, &str); 1] = [(
    "js/app.js",
    "application/javascript; charset=utf-8",
    APP_JS,
)];

// axum handler for /static/*path
pub async fn asset(Path(path): Path<String>) -> Result<Response, AppError> {
    let path = path.trim_start_matches('/');
    let (_, content_type, contents) = ASSETS
        .iter()
        .find(|(name, _, _)| *name == path)
        .ok_or(AppError::NotFound)?;

    Ok((
        [(CONTENT_TYPE, *content_type), (CACHE_CONTROL, "no-cache")],
        *contents,
    )
        .into_response())
}
