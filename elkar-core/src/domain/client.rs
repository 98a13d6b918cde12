//! Client domain types

use serde::{Deserialize, Serialize};

use crate::field::{FieldSpec, Resource, ResourceKind};
use crate::lenient;

/// A backup client as stored on the Elkarbackup server
///
/// Only the fields the reconciler manages; anything else the server returns is
/// kept aside in [`Remote`](crate::dto::remote::Remote) and sent back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub description: String,
    pub is_active: bool,
    #[serde(deserialize_with = "lenient::int")]
    pub max_parallel_jobs: i64,
    /// Quota in KB, `-1` for unlimited
    #[serde(deserialize_with = "lenient::int")]
    pub quota: i64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub rsync_short_args: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub rsync_long_args: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub ssh_args: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub url: String,
    /// Script ids run before each job of this client
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub pre_scripts: Vec<i64>,
    /// Script ids run after each job of this client
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub post_scripts: Vec<i64>,
}

impl Client {
    /// A client with the server-side defaults and the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            is_active: true,
            max_parallel_jobs: 1,
            quota: -1,
            rsync_short_args: String::new(),
            rsync_long_args: String::new(),
            ssh_args: String::new(),
            url: String::new(),
            pre_scripts: Vec::new(),
            post_scripts: Vec::new(),
        }
    }
}

impl Resource for Client {
    const KIND: ResourceKind = ResourceKind::Client;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::scalar("name"),
        FieldSpec::scalar("description"),
        FieldSpec::scalar("isActive"),
        FieldSpec::scalar("maxParallelJobs"),
        FieldSpec::scalar("quota"),
        FieldSpec::scalar("rsyncShortArgs"),
        FieldSpec::scalar("rsyncLongArgs"),
        FieldSpec::scalar("sshArgs"),
        FieldSpec::scalar("url"),
        FieldSpec::set("preScripts"),
        FieldSpec::set("postScripts"),
    ];

    fn name(&self) -> &str {
        &self.name
    }
}
