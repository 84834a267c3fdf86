use super::{config::Config, templates::Templates};
use crate::APP_USER_AGENT;
use anyhow::{Context, Result};
use reqwest::{redirect::Policy, Client};

/// Read-only state shared by every request.
pub struct AppState {
    config: Config,
    client: Client,
    templates: Templates,
}

impl AppState {
    /// Build the outbound HTTP client and load the page templates.
    ///
    /// # Errors
    /// Returns an error if the client cannot be built or a template fails to parse.
    pub fn new(config: Config) -> Result<Self> {
        // Backend redirects are relayed to the browser, never followed here.
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .redirect(Policy::none())
            .build()
            .context("Failed to build HTTP client")?;

        let templates = Templates::new().context("Failed to load page templates")?;

        Ok(Self {
            config,
            client,
            templates,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    #[must_use]
    pub fn templates(&self) -> &Templates {
        &self.templates
    }
}
