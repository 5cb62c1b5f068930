//! rb command - Remove container
//!
//! Swift refuses to delete a container that still holds objects; `--force`
//! empties it first.

use clap::Args;
use serde::Serialize;
use swc_core::{ObjectStore as _, empty_container};

use super::{connect, fail, fail_status, parse_container_path};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove a container
#[derive(Args, Debug)]
pub struct RbArgs {
    /// Target path (alias/container)
    pub target: String,

    /// Force remove even if container is not empty (deletes all objects first)
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RbOutput {
    status: &'static str,
    container: String,
    objects_deleted: usize,
}

/// Execute the rb command
pub async fn execute(args: RbArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let target = match parse_container_path(&args.target) {
        Ok(target) => target,
        Err(e) => {
            formatter.error(&e);
            return ExitCode::UsageError;
        }
    };

    let client = match connect(&target.alias, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };
    let container = target.container;

    let mut objects_deleted = 0;
    if args.force {
        match empty_container(&client, &container).await {
            Ok(summary) if summary.is_complete() => objects_deleted = summary.deleted.len(),
            Ok(summary) => {
                for (name, status) in &summary.failed {
                    formatter.warning(&format!("Failed to delete '{name}': HTTP {status}"));
                }
                formatter.error(&format!(
                    "Container '{container}' could not be emptied: {} objects left",
                    summary.failed.len()
                ));
                return ExitCode::GeneralError;
            }
            Err(e) => return fail(&formatter, &format!("Failed to empty '{container}'"), &e),
        }
    }

    match client.delete_container(&container).await {
        Ok(status) if swc_core::is_success(status) => {
            if formatter.is_json() {
                formatter.json(&RbOutput {
                    status: "success",
                    container,
                    objects_deleted,
                });
            } else {
                formatter.success(&format!("Removed container: {container}"));
            }
            ExitCode::Success
        }
        Ok(404) => {
            formatter.error(&format!("Container '{container}' not found"));
            ExitCode::NotFound
        }
        Ok(409) => {
            formatter.error(&format!(
                "Container '{container}' is not empty. Use --force to delete all objects first."
            ));
            ExitCode::Conflict
        }
        Ok(status) => fail_status(&formatter, &format!("Failed to remove '{container}'"), status),
        Err(e) => fail(&formatter, &format!("Failed to remove '{container}'"), &e),
    }
}
