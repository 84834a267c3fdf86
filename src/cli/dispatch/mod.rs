//! Command-line argument dispatch.
//!
//! Maps validated CLI arguments to the action to run, building the relay
//! configuration on the way so invalid settings abort before the listener binds.

use crate::api::Config;
use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{backend, ARG_PORT};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let backend_opts = backend::Options::parse(matches)?;

    let config = Config::new(backend_opts.api_base)
        .with_timezone(backend_opts.timezone)
        .with_backend_timeout(backend_opts.backend_timeout)
        .with_proxy_timeout(backend_opts.proxy_timeout);

    config.validate().context("invalid backend configuration")?;

    Ok(Action::Server(Args { port, config }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn dispatch(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(
            [
                ("OTPI_PORT", None::<&str>),
                ("OTPI_API_BASE", None),
                ("OTPI_TIMEZONE", None),
                ("OTPI_BACKEND_TIMEOUT", None),
                ("OTPI_PROXY_TIMEOUT", None),
            ],
            || {
                let mut argv = vec!["otpi"];
                argv.extend_from_slice(args);
                let matches = crate::cli::commands::new().get_matches_from(argv);
                handler(&matches)
            },
        )
    }

    #[test]
    fn defaults_build_a_server_action() -> Result<()> {
        let Action::Server(args) = dispatch(&[])?;

        assert_eq!(args.port, 8080);
        assert_eq!(args.config.api_base().as_str(), "http://localhost:8000/");
        assert_eq!(args.config.backend_timeout(), Duration::from_secs(5));
        assert_eq!(args.config.proxy_timeout(), Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let result = dispatch(&["--timezone", "Mars/Olympus_Mons"]);
        assert!(result.is_err());
        if let Err(err) = result {
            assert!(err.to_string().contains("invalid --timezone"));
        }
    }

    #[test]
    fn relative_api_base_is_rejected() {
        let result = dispatch(&["--api-base", "backend:8000/v1"]);
        assert!(result.is_err());
    }

    #[test]
    fn proxy_timeout_must_cover_backend_timeout() {
        let result = dispatch(&["--backend-timeout", "10", "--proxy-timeout", "5"]);
        assert!(result.is_err());
        if let Err(err) = result {
            assert!(err.to_string().contains("invalid backend configuration"));
        }
    }
}
