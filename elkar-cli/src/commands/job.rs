//! Job command
//!
//! Declares the desired state of one Job, attached to a Client by name.

use anyhow::Result;
use clap::{ArgAction, Args};
use elkar_core::domain::job::{Job, NotificationTarget};
use elkar_core::dto::spec::{DesiredState, JobSpec};
use serde::Deserialize;

/// Desired state of a Job
#[derive(Debug, Clone, Args, Deserialize)]
pub struct JobArgs {
    /// Job name
    #[arg(long)]
    pub name: String,

    /// Desired state
    #[arg(long)]
    pub state: DesiredState,

    /// Name of the Client the job belongs to (required when present)
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub client_name: String,

    /// Job description
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub description: String,

    /// Base path for the backup
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub path: String,

    /// Job activation status
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Exclude pattern
    #[arg(long)]
    #[serde(default)]
    pub exclude: Option<String>,

    /// Include pattern
    #[arg(long)]
    #[serde(default)]
    pub include: Option<String>,

    /// Email notification level
    #[arg(long, default_value_t = 0)]
    #[serde(default)]
    pub min_notification_level: i64,

    /// Email destination for notifications
    #[arg(long)]
    #[serde(default)]
    pub notifications_email: Option<String>,

    /// Notification recipients (admin, owner, email), comma separated
    #[arg(long, value_delimiter = ',')]
    #[serde(default)]
    pub notifications_to: Vec<NotificationTarget>,

    /// Policy id
    #[arg(long, default_value_t = 1)]
    #[serde(default = "default_id")]
    pub policy: i64,

    /// Backup location id
    #[arg(long, default_value_t = 1)]
    #[serde(default = "default_id")]
    pub backup_location: i64,

    /// Token for enqueuing the job externally
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub token: String,

    /// Enable local permissions on the backup
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    #[serde(default = "default_true")]
    pub use_local_permissions: bool,

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

fn default_id() -> i64 {
    1
}

impl JobArgs {
    pub fn into_spec(self) -> Result<JobSpec> {
        if self.name.is_empty() {
            anyhow::bail!("name cannot be empty");
        }

        if self.state == DesiredState::Absent {
            return Ok(JobSpec::absent(self.name));
        }

        if self.client_name.is_empty() {
            anyhow::bail!("client_name is required when state is present");
        }

        let job = Job {
            name: self.name,
            client: 0,
            description: self.description,
            path: self.path,
            is_active: self.is_active,
            exclude: self.exclude,
            include: self.include,
            min_notification_level: self.min_notification_level,
            notifications_email: self.notifications_email,
            notifications_to: self.notifications_to,
            policy: self.policy,
            backup_location: self.backup_location,
            token: self.token,
            use_local_permissions: self.use_local_permissions,
            pre_scripts: self.pre_scripts,
            post_scripts: self.post_scripts,
        };

        Ok(JobSpec::present(self.client_name, job))
    }
}
