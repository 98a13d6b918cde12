//! Desired-state specifications supplied by callers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ResourceId;
use crate::domain::client::Client;
use crate::domain::job::Job;

/// Whether the named resource should exist on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    Present,
    Absent,
}

impl FromStr for DesiredState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(DesiredState::Present),
            "absent" => Ok(DesiredState::Absent),
            other => Err(format!(
                "invalid state '{other}' (expected present or absent)"
            )),
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesiredState::Present => write!(f, "present"),
            DesiredState::Absent => write!(f, "absent"),
        }
    }
}

/// Target specification for one Client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSpec {
    pub state: DesiredState,
    pub client: Client,
}

impl ClientSpec {
    pub fn present(client: Client) -> Self {
        Self {
            state: DesiredState::Present,
            client,
        }
    }

    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            state: DesiredState::Absent,
            client: Client::new(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.client.name
    }
}

/// Target specification for one Job
///
/// The owning Client is named, not numbered; `job.client` is ignored and
/// replaced by the resolved id when the payload is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub state: DesiredState,
    pub client_name: String,
    pub job: Job,
}

impl JobSpec {
    pub fn present(client_name: impl Into<String>, job: Job) -> Self {
        Self {
            state: DesiredState::Present,
            client_name: client_name.into(),
            job,
        }
    }

    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            state: DesiredState::Absent,
            client_name: String::new(),
            job: Job::new(name, ""),
        }
    }

    pub fn name(&self) -> &str {
        &self.job.name
    }

    /// The full job payload bound to a resolved Client
    pub fn bind(&self, client: ResourceId) -> Job {
        Job {
            client,
            ..self.job.clone()
        }
    }
}
