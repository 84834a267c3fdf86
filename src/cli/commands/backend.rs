use clap::{Arg, ArgMatches, Command};
use jiff::tz::TimeZone;
use std::time::Duration;
use url::Url;

pub const ARG_API_BASE: &str = "api-base";
pub const ARG_TIMEZONE: &str = "timezone";
pub const ARG_BACKEND_TIMEOUT: &str = "backend-timeout";
pub const ARG_PROXY_TIMEOUT: &str = "proxy-timeout";

#[derive(Debug, Clone)]
pub struct Options {
    pub api_base: Url,
    pub timezone: TimeZone,
    pub backend_timeout: Duration,
    pub proxy_timeout: Duration,
}

impl Options {
    /// Parse backend arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the base URL or the timezone cannot be parsed.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read_required = |id: &str| -> anyhow::Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };
        let read_seconds = |id: &str| -> anyhow::Result<Duration> {
            matches
                .get_one::<u64>(id)
                .copied()
                .map(Duration::from_secs)
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };

        let api_base = read_required(ARG_API_BASE)?;
        let api_base = Url::parse(api_base.trim())
            .map_err(|e| anyhow::anyhow!("invalid --{ARG_API_BASE} '{api_base}': {e}"))?;

        let timezone = read_required(ARG_TIMEZONE)?;
        let timezone = TimeZone::get(timezone.trim())
            .map_err(|e| anyhow::anyhow!("invalid --{ARG_TIMEZONE} '{timezone}': {e}"))?;

        Ok(Self {
            api_base,
            timezone,
            backend_timeout: read_seconds(ARG_BACKEND_TIMEOUT)?,
            proxy_timeout: read_seconds(ARG_PROXY_TIMEOUT)?,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE)
                .long(ARG_API_BASE)
                .help("Base URL of the authentication backend, /api/* is relayed here")
                .env("OTPI_API_BASE")
                .default_value("http://localhost:8000"),
        )
        .arg(
            Arg::new(ARG_TIMEZONE)
                .long(ARG_TIMEZONE)
                .help("IANA timezone used to display user timestamps")
                .env("OTPI_TIMEZONE")
                .default_value("Asia/Seoul"),
        )
        .arg(
            Arg::new(ARG_BACKEND_TIMEOUT)
                .long(ARG_BACKEND_TIMEOUT)
                .help("Timeout in seconds for page-level backend calls")
                .env("OTPI_BACKEND_TIMEOUT")
                .default_value("5")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_PROXY_TIMEOUT)
                .long(ARG_PROXY_TIMEOUT)
                .help("Timeout in seconds for relayed /api calls")
                .env("OTPI_PROXY_TIMEOUT")
                .default_value("30")
                .value_parser(clap::value_parser!(u64)),
        )
}
