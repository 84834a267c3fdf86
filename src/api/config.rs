//! Relay configuration: backend address, display timezone and call budgets.

use anyhow::{anyhow, Result};
use jiff::tz::TimeZone;
use std::time::Duration;
use url::Url;

const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 5;
const DEFAULT_PROXY_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

#[derive(Clone, Debug)]
pub struct Config {
    api_base: Url,
    timezone: TimeZone,
    backend_timeout: Duration,
    proxy_timeout: Duration,
}

impl Config {
    #[must_use]
    pub fn new(api_base: Url) -> Self {
        Self {
            api_base,
            timezone: TimeZone::get(DEFAULT_TIMEZONE).unwrap_or(TimeZone::UTC),
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECONDS),
            proxy_timeout: Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECONDS),
        }
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: TimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_proxy_timeout(mut self, timeout: Duration) -> Self {
        self.proxy_timeout = timeout;
        self
    }

    #[must_use]
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    #[must_use]
    pub fn timezone(&self) -> &TimeZone {
        &self.timezone
    }

    #[must_use]
    pub fn backend_timeout(&self) -> Duration {
        self.backend_timeout
    }

    #[must_use]
    pub fn proxy_timeout(&self) -> Duration {
        self.proxy_timeout
    }

    /// Check that the backend address is usable and the proxy budget is the
    /// largest timeout, since every API call goes through the relay.
    ///
    /// # Errors
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        match self.api_base.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(anyhow!(
                    "backend base URL must use http or https, got '{scheme}'"
                ))
            }
        }

        if self.api_base.host_str().is_none() {
            return Err(anyhow!("backend base URL must include a host"));
        }

        if self.api_base.query().is_some() || self.api_base.fragment().is_some() {
            return Err(anyhow!(
                "backend base URL must not carry a query or fragment"
            ));
        }

        if self.backend_timeout.is_zero() || self.proxy_timeout.is_zero() {
            return Err(anyhow!("timeouts must be greater than zero"));
        }

        if self.proxy_timeout < self.backend_timeout {
            return Err(anyhow!(
                "proxy timeout ({}s) must not be shorter than backend timeout ({}s)",
                self.proxy_timeout.as_secs(),
                self.backend_timeout.as_secs()
            ));
        }

        Ok(())
    }

    /// Resolve `path` (relative to the backend base) into an absolute URL,
    /// appending the raw `query` untouched.
    ///
    /// The base path is kept: `http://b:8000/v1` and `me` give `http://b:8000/v1/me`.
    ///
    /// # Errors
    /// Returns an error if the joined string is not a valid URL.
    pub fn backend_url(&self, path: &str, query: Option<&str>) -> Result<Url, url::ParseError> {
        let base = self.api_base.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');

        let target = match query {
            Some(query) if !query.is_empty() => format!("{base}/{path}?{query}"),
            _ => format!("{base}/{path}"),
        };

        Url::parse(&target)
    }
}
