//! `/api/*` relay to the authentication backend.

use crate::api::{error::AppError, AppState};
use axum::{
    body::{Body, Bytes},
    extract::Extension,
    http::{
        header::{
            ACCEPT_ENCODING, CONNECTION, CONTENT_ENCODING, CONTENT_LENGTH, HOST, SET_COOKIE,
            TRANSFER_ENCODING,
        },
        HeaderMap, HeaderName, Method, StatusCode, Uri,
    },
    response::Response,
};
use reqwest::RequestBuilder;
use std::sync::Arc;
use tracing::{debug, instrument, Span};

/// Local prefix stripped before forwarding.
pub const API_PREFIX: &str = "/api";

/// Request headers the outbound client sets itself.
const REQUEST_HEADER_EXCLUDES: [HeaderName; 5] = [
    HOST,
    CONTENT_LENGTH,
    TRANSFER_ENCODING,
    CONNECTION,
    ACCEPT_ENCODING,
];

/// Response headers that describe the backend's framing, not ours. The body
/// arrives decoded and axum writes its own length and connection headers.
const RESPONSE_HEADER_EXCLUDES: [HeaderName; 4] =
    [CONTENT_ENCODING, CONTENT_LENGTH, TRANSFER_ENCODING, CONNECTION];

/// Backend answer, fully read.
struct Upstream {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

// axum handler for the relay
#[instrument(
    skip_all,
    fields(http.method = %method, upstream.path = tracing::field::Empty, upstream.status = tracing::field::Empty)
)]
pub async fn proxy(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let path = backend_path(&uri);
    if has_dot_segment(path) {
        debug!("Refusing to relay dot segment in {path:?}");
        return Err(AppError::NotFound);
    }

    let target = state
        .config()
        .backend_url(path, uri.query())
        .map_err(AppError::internal)?;

    Span::current().record("upstream.path", target.path());

    let mut request = state
        .client()
        .request(method, target)
        .headers(forward_headers(&headers))
        .timeout(state.config().proxy_timeout());

    if !body.is_empty() {
        request = request.body(body);
    }

    // The backend call runs on its own task so a client hanging up does not
    // abort it half way.
    let upstream = tokio::spawn(send(request))
        .await
        .map_err(AppError::internal)??;

    Span::current().record("upstream.status", upstream.status.as_u16());
    debug!("Relayed {} bytes", upstream.body.len());

    Ok(into_response(upstream))
}

/// Path below [`API_PREFIX`], still percent-encoded as the browser sent it.
fn backend_path(uri: &Uri) -> &str {
    let path = uri.path();
    path.strip_prefix(API_PREFIX).unwrap_or(path)
}

/// `.` and `..` segments, percent-encoded or not, are resolved by the URL
/// parser and would let a request climb out of the backend base path.
/// Backslashes count as separators for `http(s)` URLs.
fn has_dot_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| {
        let segment = segment.to_ascii_lowercase().replace("%2e", ".");
        segment == "." || segment == ".."
    })
}

async fn send(request: RequestBuilder) -> Result<Upstream, AppError> {
    let response = request
        .send()
        .await
        .map_err(|err| AppError::from_upstream(&err))?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .bytes()
        .await
        .map_err(|err| AppError::from_upstream(&err))?;

    Ok(Upstream {
        status,
        headers,
        body,
    })
}

fn into_response(upstream: Upstream) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = relay_headers(&upstream.headers);
    response
}

/// Copy browser headers for the backend, minus the ones the client recomputes.
fn forward_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(incoming.len());
    for (name, value) in incoming {
        if !REQUEST_HEADER_EXCLUDES.contains(name) {
            forwarded.append(name.clone(), value.clone());
        }
    }
    forwarded
}

/// Copy backend headers for the browser. `Set-Cookie` is skipped in the
/// generic pass and re-attached value by value, so each cookie the backend
/// set shows up exactly once.
fn relay_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if name == SET_COOKIE || RESPONSE_HEADER_EXCLUDES.contains(name) {
            continue;
        }
        relayed.append(name.clone(), value.clone());
    }

    for cookie in upstream.get_all(SET_COOKIE) {
        relayed.append(SET_COOKIE, cookie.clone());
    }

    relayed
}
