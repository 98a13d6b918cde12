//! Job domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ResourceId;
use crate::field::{FieldSpec, Resource, ResourceKind};
use crate::lenient;

/// A backup job as stored on the Elkarbackup server
///
/// `client` holds the id of the owning Client; it is resolved from a client
/// name before any write and is never taken from the caller directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub name: String,
    #[serde(deserialize_with = "lenient::int")]
    pub client: ResourceId,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub description: String,
    /// Base path to back up on the client
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub path: String,
    pub is_active: bool,
    #[serde(default)]
    pub exclude: Option<String>,
    #[serde(default)]
    pub include: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub min_notification_level: i64,
    #[serde(default)]
    pub notifications_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub notifications_to: Vec<NotificationTarget>,
    #[serde(deserialize_with = "lenient::int")]
    pub policy: ResourceId,
    #[serde(deserialize_with = "lenient::int")]
    pub backup_location: ResourceId,
    /// Token for enqueuing the job externally
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub token: String,
    pub use_local_permissions: bool,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub pre_scripts: Vec<i64>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub post_scripts: Vec<i64>,
}

impl Job {
    /// A job with the server-side defaults
    ///
    /// `client` is left at `0` until the owning Client has been resolved.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client: 0,
            description: String::new(),
            path: path.into(),
            is_active: true,
            exclude: None,
            include: None,
            min_notification_level: 0,
            notifications_email: None,
            notifications_to: Vec::new(),
            policy: 1,
            backup_location: 1,
            token: String::new(),
            use_local_permissions: true,
            pre_scripts: Vec::new(),
            post_scripts: Vec::new(),
        }
    }
}

impl Resource for Job {
    const KIND: ResourceKind = ResourceKind::Job;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::scalar("name"),
        FieldSpec::scalar("client"),
        FieldSpec::scalar("description"),
        FieldSpec::scalar("path"),
        FieldSpec::scalar("isActive"),
        FieldSpec::nullable("exclude"),
        FieldSpec::nullable("include"),
        FieldSpec::scalar("minNotificationLevel"),
        FieldSpec::nullable("notificationsEmail"),
        FieldSpec::set("notificationsTo"),
        FieldSpec::scalar("policy"),
        FieldSpec::scalar("backupLocation"),
        FieldSpec::scalar("token"),
        FieldSpec::scalar("useLocalPermissions"),
        FieldSpec::set("preScripts"),
        FieldSpec::set("postScripts"),
    ];

    fn name(&self) -> &str {
        &self.name
    }
}

/// Recipient class for job notification emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTarget {
    Admin,
    Owner,
    Email,
}

impl FromStr for NotificationTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(NotificationTarget::Admin),
            "owner" => Ok(NotificationTarget::Owner),
            "email" => Ok(NotificationTarget::Email),
            other => Err(format!(
                "invalid notification target '{other}' (expected admin, owner or email)"
            )),
        }
    }
}

impl fmt::Display for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationTarget::Admin => write!(f, "admin"),
            NotificationTarget::Owner => write!(f, "owner"),
            NotificationTarget::Email => write!(f, "email"),
        }
    }
}
