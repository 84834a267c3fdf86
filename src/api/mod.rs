use crate::api::handlers::{assets, health, pages, proxy, user_info};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

mod config;
pub mod display;
pub mod error;
pub mod handlers;
mod state;
mod templates;

pub use config::Config;
pub use state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the application router: pages, relay, assets and health.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::welcome))
        .route("/main", get(user_info::user_info))
        .route("/health", get(health::health))
        .route("/static/*path", get(assets::asset))
        .route(
            "/api/*path",
            get(proxy::proxy)
                .post(proxy::proxy)
                .put(proxy::proxy)
                .delete(proxy::proxy)
                .patch(proxy::proxy),
        )
        .route("/:page", get(pages::app_shell))
        .fallback(pages::not_found)
        .layer(Extension(state))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, config: Config) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static(REQUEST_ID_HEADER),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                REQUEST_ID_HEADER,
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span)),
    );

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gracefully shutdown");

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
