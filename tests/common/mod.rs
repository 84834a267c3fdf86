//! Shared helpers: a router wired to a `wiremock` backend.

#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::Response,
    Router,
};
use otpi::api::{router, AppState, Config};
use std::{net::TcpListener, sync::Arc, time::Duration};
use url::Url;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn config_for(base: &str) -> Result<Config> {
    let base = Url::parse(base).context("invalid test backend URL")?;
    Ok(Config::new(base))
}

pub fn app(config: Config) -> Result<Router> {
    Ok(router(Arc::new(AppState::new(config)?)))
}

/// Router with short budgets so timeout tests stay fast.
pub fn app_with_short_timeouts(base: &str) -> Result<Router> {
    app(config_for(base)?
        .with_backend_timeout(Duration::from_millis(200))
        .with_proxy_timeout(Duration::from_millis(300)))
}

pub async fn body_bytes(response: Response<Body>) -> Result<Vec<u8>> {
    Ok(to_bytes(response.into_body(), usize::MAX).await?.to_vec())
}

pub async fn body_string(response: Response<Body>) -> Result<String> {
    Ok(String::from_utf8(body_bytes(response).await?)?)
}
