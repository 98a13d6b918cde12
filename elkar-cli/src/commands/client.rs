//! Client command
//!
//! Declares the desired state of one Client. The same arguments are accepted
//! from the command line and from `apply` documents.

use anyhow::Result;
use clap::{ArgAction, Args};
use elkar_core::domain::client::Client;
use elkar_core::dto::spec::{ClientSpec, DesiredState};
use serde::Deserialize;

/// Desired state of a Client
#[derive(Debug, Clone, Args, Deserialize)]
pub struct ClientArgs {
    /// Client name
    #[arg(long)]
    pub name: String,

    /// Desired state
    #[arg(long)]
    pub state: DesiredState,

    /// Client description
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub description: String,

    /// Client activation status
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Number of parallel jobs allowed for this client
    #[arg(long, default_value_t = 1)]
    #[serde(default = "default_max_parallel_jobs")]
    pub max_parallel_jobs: i64,

    /// Client quota in KB (-1 for unlimited)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    #[serde(default = "default_quota")]
    pub quota: i64,

    /// Additional rsync arguments, short form
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    #[serde(default)]
    pub rsync_short_args: String,

    /// Additional rsync arguments, long form
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    #[serde(default)]
    pub rsync_long_args: String,

    /// Additional ssh arguments
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    #[serde(default)]
    pub ssh_args: String,

    /// Access URL for the client
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub url: String,

    /// Pre-script ids, comma separated
    #[arg(long, value_delimiter = ',')]
    #[serde(default)]
    pub pre_scripts: Vec<i64>,

    /// Post-script ids, comma separated
    #[arg(long, value_delimiter = ',')]
    #[serde(default)]
    pub post_scripts: Vec<i64>,
}

fn default_true() -> bool {
    true
}

fn default_max_parallel_jobs() -> i64 {
    1
}

fn default_quota() -> i64 {
    -1
}

impl ClientArgs {
    pub fn into_spec(self) -> Result<ClientSpec> {
        if self.name.is_empty() {
            anyhow::bail!("name cannot be empty");
        }

        if self.state == DesiredState::Absent {
            return Ok(ClientSpec::absent(self.name));
        }

        Ok(ClientSpec::present(Client {
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            max_parallel_jobs: self.max_parallel_jobs,
            quota: self.quota,
            rsync_short_args: self.rsync_short_args,
            rsync_long_args: self.rsync_long_args,
            ssh_args: self.ssh_args,
            url: self.url,
            pre_scripts: self.pre_scripts,
            post_scripts: self.post_scripts,
        }))
    }
}
