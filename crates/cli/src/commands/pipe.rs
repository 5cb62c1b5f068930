//! pipe command - Stream stdin to Swift
//!
//! Reads from stdin and uploads to an object. Useful for piping output from
//! other commands. The content type is sniffed from the data itself.

use clap::Args;
use serde::Serialize;
use swc_core::{ObjectStore as _, UploadSource, is_success};

use super::{connect, fail, fail_status, parse_object_path};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Stream stdin to an object
#[derive(Args, Debug)]
pub struct PipeArgs {
    /// Destination path (alias/container/object)
    pub target: String,
}

#[derive(Debug, Serialize)]
struct PipeOutput {
    status: &'static str,
    target: String,
}

/// Execute the pipe command
pub async fn execute(args: PipeArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let target = match parse_object_path(&args.target) {
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

    let spinner = ProgressBar::spinner(formatter.config(), "Uploading from stdin");
    let result = client
        .create_object(
            &target.container,
            UploadSource::stream(std::io::stdin()),
            Some(target.object.clone()),
        )
        .await;
    spinner.finish_and_clear();

    let target_display = target.to_full_path();
    match result {
        Ok(status) if is_success(status) => {
            if formatter.is_json() {
                formatter.json(&PipeOutput {
                    status: "success",
                    target: target_display,
                });
            } else {
                formatter.success(&format!("Uploaded to {target_display}"));
            }
            ExitCode::Success
        }
        Ok(status) => fail_status(&formatter, "Failed to upload", status),
        Err(e) => fail(&formatter, "Failed to upload", &e),
    }
}
