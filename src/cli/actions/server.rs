use crate::api::{self, Config};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub config: Config,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Relay configuration: {:?}", args.config);

    api::new(args.port, args.config).await
}
