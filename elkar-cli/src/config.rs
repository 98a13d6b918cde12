//! Configuration module
//!
//! Connection settings for the Elkarbackup server, taken from flags or the
//! `ELKARBACKUP_*` environment variables.

use std::time::Duration;

use anyhow::{Context, Result};
use elkar_client::{Credentials, ElkarClient};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server URL without the `/api` part (e.g., "http://localhost:8000")
    pub api_url: String,

    /// User for API authentication (an ADMIN account)
    pub api_user: String,

    pub api_password: String,

    /// Per-request timeout; unset means the transport default (none)
    pub timeout: Option<Duration>,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.api_user.is_empty() {
            anyhow::bail!("api_user cannot be empty");
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }

    /// Build the API client described by this configuration
    pub fn client(&self) -> Result<ElkarClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(ElkarClient::with_client(
            &self.api_url,
            Credentials::new(&self.api_user, &self.api_password),
            http,
        ))
    }
}
