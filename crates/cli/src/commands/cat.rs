//! cat command - Display object contents
//!
//! Outputs the entire content of an object to stdout.

use clap::Args;
use std::io::{self, Write};
use swc_core::ObjectStore as _;

use super::{connect, fail, parse_object_path};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Display object contents
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Object path (alias/container/object)
    pub path: String,
}

/// Execute the cat command
pub async fn execute(args: CatArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_object_path(&args.path) {
        Ok(path) => path,
        Err(e) => {
            formatter.error(&e);
            return ExitCode::UsageError;
        }
    };

    let client = match connect(&path.alias, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    match client.retrieve_object(&path.container, &path.object).await {
        Ok((true, data)) => {
            // Bypass the formatter to keep binary data intact
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(&data).and_then(|()| stdout.flush()) {
                formatter.error(&format!("Failed to write to stdout: {e}"));
                return ExitCode::GeneralError;
            }
            ExitCode::Success
        }
        Ok((false, _)) => {
            formatter.error(&format!("Object not found: {}", args.path));
            ExitCode::NotFound
        }
        Err(e) => fail(&formatter, "Failed to get object", &e),
    }
}
