//! mb command - Make container
//!
//! Creates a new container in the alias's account.

use clap::Args;
use serde::Serialize;
use swc_core::{ObjectStore as _, ensure_container};

use super::{connect, fail, fail_status, parse_container_path};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create a container
#[derive(Args, Debug)]
pub struct MbArgs {
    /// Target path (alias/container)
    pub target: String,

    /// Ignore error if container already exists
    #[arg(short = 'p', long)]
    pub ignore_existing: bool,
}

#[derive(Debug, Serialize)]
struct MbOutput {
    status: &'static str,
    container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Execute the mb command
pub async fn execute(args: MbArgs, output_config: OutputConfig) -> ExitCode {
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

    if args.ignore_existing {
        return match ensure_container(&client, &container).await {
            Ok(created) => {
                let message = (!created).then(|| "Container already exists".to_string());
                report(&formatter, &container, message);
                ExitCode::Success
            }
            Err(e) => fail(&formatter, &format!("Failed to create '{container}'"), &e),
        };
    }

    match client.create_container(&container).await {
        Ok(201) => {
            report(&formatter, &container, None);
            ExitCode::Success
        }
        // Swift answers 202 when the container was already there
        Ok(202) => {
            formatter.error(&format!("Container '{container}' already exists"));
            ExitCode::Conflict
        }
        Ok(status) => fail_status(&formatter, &format!("Failed to create '{container}'"), status),
        Err(e) => fail(&formatter, &format!("Failed to create '{container}'"), &e),
    }
}

fn report(formatter: &Formatter, container: &str, message: Option<String>) {
    if formatter.is_json() {
        formatter.json(&MbOutput {
            status: "success",
            container: container.to_string(),
            message,
        });
    } else if let Some(message) = message {
        formatter.success(&format!("{message}: {container}"));
    } else {
        formatter.success(&format!("Container created: {container}"));
    }
}
