//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod apply;
mod client;
mod job;

pub use client::ClientArgs;
pub use job::JobArgs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use elkar_reconciler::{ReconcileResult, Reconciler};

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile a client
    Client(ClientArgs),
    /// Reconcile a job
    Job(JobArgs),
    /// Reconcile the resource described by a JSON document
    Apply {
        /// Path to a document of the form {"kind": "client"|"job", ...arguments}
        file: PathBuf,
    },
}

/// Handle a CLI command
///
/// Builds the desired specification, runs one reconciliation against the
/// configured server and returns its result. Errors are reserved for invalid
/// input; reconciliation failures are part of the returned result.
pub async fn handle_command(command: Commands, config: &Config) -> Result<ReconcileResult> {
    let reconciler = Reconciler::new(config.client()?);

    match command {
        Commands::Client(args) => {
            let spec = args.into_spec()?;
            Ok(reconciler.reconcile_client(&spec).await)
        }
        Commands::Job(args) => {
            let spec = args.into_spec()?;
            Ok(reconciler.reconcile_job(&spec).await)
        }
        Commands::Apply { file } => apply::handle_apply(&reconciler, &file).await,
    }
}
