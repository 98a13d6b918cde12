//! Result rendering

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use elkar_reconciler::ReconcileResult;

/// How the reconciliation result is printed on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The result map as JSON
    Json,
    /// A one-line human summary
    Text,
}

/// Print `result` to stdout
pub fn print_result(result: &ReconcileResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => println!("{}", summary(result)),
    }
    Ok(())
}

fn summary(result: &ReconcileResult) -> ColoredString {
    if result.is_failure() {
        let msg = result.msg.as_deref().unwrap_or("reconciliation failed");
        let line = match &result.api_result {
            Some(api_result) => format!("failed: {} ({})", msg, api_result),
            None => format!("failed: {}", msg),
        };
        return line.red();
    }

    match (result.changed, result.id) {
        (true, Some(id)) => format!("changed (id {})", id).yellow(),
        (true, None) => "changed".yellow(),
        (false, _) => "ok".green(),
    }
}
