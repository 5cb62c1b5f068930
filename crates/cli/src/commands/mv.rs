//! mv command - Move objects
//!
//! Moves an object within its container: server-side copy, then delete.

use clap::Args;
use serde::Serialize;
use swc_core::{ObjectStore as _, ParsedPath, RemotePath, is_success, parse_path};

use super::cp::{remote_copy_target, report_copy_target_error, server_copy};
use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Move objects
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Source path (alias/container/object)
    pub source: String,

    /// Destination path (alias/container/object, or alias/container/prefix/)
    pub target: String,

    /// Only show what would be moved (dry run)
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct MvOutput {
    status: &'static str,
    source: String,
    target: String,
}

/// Execute the mv command
pub async fn execute(args: MvArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (src, dst) = match (parse_path(&args.source), parse_path(&args.target)) {
        (Ok(ParsedPath::Remote(src)), Ok(ParsedPath::Remote(dst))) => (src, dst),
        (Err(e), _) => {
            formatter.error(&format!("Invalid source path: {e}"));
            return ExitCode::UsageError;
        }
        (_, Err(e)) => {
            formatter.error(&format!("Invalid target path: {e}"));
            return ExitCode::UsageError;
        }
        _ => {
            formatter.error("mv works on remote objects only. Use cp for local files.");
            return ExitCode::UsageError;
        }
    };

    let dest = match remote_copy_target(&src, &dst) {
        Ok(dest) => dest,
        Err(code) => return report_copy_target_error(&formatter, code, &src, &dst),
    };
    if dest == src.object {
        formatter.error(&format!("Source and destination are the same: {src}"));
        return ExitCode::UsageError;
    }

    if args.dry_run {
        let target = RemotePath::new(&src.alias, &src.container, &dest);
        formatter.println(&format!("Would move: {src} -> {target}"));
        return ExitCode::Success;
    }

    let client = match connect(&src.alias, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let dst_display = match server_copy(&client, &src, &dest, &formatter).await {
        Ok(dst_display) => dst_display,
        Err(code) => return code,
    };

    match client.delete_object(&src.container, &src.object).await {
        Ok(status) if is_success(status) => {
            if formatter.is_json() {
                formatter.json(&MvOutput {
                    status: "success",
                    source: src.to_full_path(),
                    target: dst_display,
                });
            } else {
                formatter.println(&format!("{src} -> {dst_display}"));
            }
            ExitCode::Success
        }
        Ok(status) => {
            formatter.error(&format!(
                "Copied to {dst_display} but failed to delete {src}: HTTP {status}"
            ));
            ExitCode::from_status(status)
        }
        Err(e) => fail(
            &formatter,
            &format!("Copied to {dst_display} but failed to delete {src}"),
            &e,
        ),
    }
}
