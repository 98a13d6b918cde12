//! Apply command
//!
//! Reads a desired-state document using the same argument names as the
//! `client` and `job` commands (snake_case), tagged with its `kind`.
//! Connection arguments found in the document (`api_url`, ...) are ignored;
//! they always come from the command line or environment.

use std::path::Path;

use anyhow::{Context, Result};
use elkar_core::domain::client::Client;
use elkar_core::domain::job::Job;
use elkar_reconciler::{ReconcileResult, Reconciler, ResourceRepository};
use serde::Deserialize;

use super::{ClientArgs, JobArgs};

/// A desired-state document
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ApplyDocument {
    Client(ClientArgs),
    Job(JobArgs),
}

impl ApplyDocument {
    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Invalid apply document")
    }
}

/// Reconcile the resource described in `file`
pub async fn handle_apply<A>(reconciler: &Reconciler<A>, file: &Path) -> Result<ReconcileResult>
where
    A: ResourceRepository<Client> + ResourceRepository<Job>,
{
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    match ApplyDocument::parse(&contents)? {
        ApplyDocument::Client(args) => {
            let spec = args.into_spec()?;
            Ok(reconciler.reconcile_client(&spec).await)
        }
        ApplyDocument::Job(args) => {
            let spec = args.into_spec()?;
            Ok(reconciler.reconcile_job(&spec).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elkar_core::dto::spec::DesiredState;

    #[test]
    fn test_parse_client_document() {
        let doc = ApplyDocument::parse(
            r#"{
                "kind": "client",
                "api_url": "http://localhost:8000",
                "name": "Name1",
                "description": "Description for Name1",
                "is_active": false,
                "quota": 20000,
                "max_parallel_jobs": 4,
                "ssh_args": "-P 1000",
                "rsync_short_args": "-fGE",
                "rsync_long_args": "--longarg",
                "pre_scripts": [1, 2],
                "post_scripts": [2],
                "state": "present",
                "url": "name1.example.com"
            }"#,
        )
        .unwrap();

        let ApplyDocument::Client(args) = doc else {
            panic!("expected a client document");
        };
        let spec = args.into_spec().unwrap();
        assert_eq!(spec.client.max_parallel_jobs, 4);
        assert_eq!(spec.client.rsync_short_args, "-fGE");
        assert_eq!(spec.client.url, "name1.example.com");
    }

    #[test]
    fn test_parse_job_document() {
        let doc = ApplyDocument::parse(r#"{"kind": "job", "name": "job1", "state": "absent"}"#)
            .unwrap();

        let ApplyDocument::Job(args) = doc else {
            panic!("expected a job document");
        };
        assert_eq!(args.into_spec().unwrap().state, DesiredState::Absent);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(ApplyDocument::parse(r#"{"kind": "policy", "name": "p"}"#).is_err());
    }

    #[test]
    fn test_missing_state_is_rejected() {
        assert!(ApplyDocument::parse(r#"{"kind": "client", "name": "Name1"}"#).is_err());
    }
}
