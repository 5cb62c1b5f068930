//! rm command - Remove objects
//!
//! Removes one or more objects. With `--recursive` every object under a
//! prefix (or the whole container) is removed one request at a time.

use std::collections::HashMap;

use clap::Args;
use serde::Serialize;
use swc_core::{ObjectStore as _, RemotePath, is_success, parse_remote_path};
use swc_swift::SwiftClient;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object path(s) to remove (alias/container/object or alias/container/prefix/)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Remove recursively (remove all objects with the given prefix)
    #[arg(short, long)]
    pub recursive: bool,

    /// Ignore objects that do not exist
    #[arg(short, long)]
    pub force: bool,

    /// Only show what would be deleted (dry run)
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    deleted: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<String>,
    total: usize,
}

/// Outcome of one path argument
#[derive(Debug, Default)]
struct Removal {
    deleted: Vec<String>,
    failed: Vec<String>,
    code: Option<ExitCode>,
}

impl Removal {
    fn failure(code: ExitCode) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let mut targets = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        match parse_rm_path(path, args.recursive) {
            Ok(target) => targets.push(target),
            Err(e) => {
                formatter.error(&e);
                return ExitCode::UsageError;
            }
        }
    }

    let mut clients: HashMap<String, SwiftClient> = HashMap::new();
    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    let mut exit_code = ExitCode::Success;

    for target in &targets {
        if !clients.contains_key(&target.alias) {
            match connect(&target.alias, &formatter).await {
                Ok(client) => {
                    clients.insert(target.alias.clone(), client);
                }
                // Credentials are per alias; later paths would fail the same way
                Err(code) => return code,
            }
        }

        let Some(client) = clients.get(&target.alias) else {
            continue;
        };
        let removal = if args.recursive {
            remove_prefix(client, target, &args, &formatter).await
        } else {
            remove_single(client, target, &args, &formatter).await
        };

        deleted.extend(removal.deleted);
        failed.extend(removal.failed);
        if let Some(code) = removal.code {
            exit_code = code;
        }
    }

    if formatter.is_json() {
        formatter.json(&RmOutput {
            status: if failed.is_empty() && exit_code == ExitCode::Success {
                "success"
            } else {
                "partial"
            },
            total: deleted.len(),
            deleted,
            failed,
        });
    } else if !args.dry_run && !deleted.is_empty() {
        formatter.success(&format!("Removed {} object(s).", deleted.len()));
    }

    exit_code
}

async fn remove_single(
    client: &SwiftClient,
    target: &RemotePath,
    args: &RmArgs,
    formatter: &Formatter,
) -> Removal {
    let full_path = target.to_full_path();
    if args.dry_run {
        formatter.println(&format!("Would remove: {full_path}"));
        return Removal {
            deleted: vec![full_path],
            ..Default::default()
        };
    }

    match client.delete_object(&target.container, &target.object).await {
        Ok(status) if is_success(status) => {
            if !formatter.is_json() {
                formatter.println(&format!("Removed: {full_path}"));
            }
            Removal {
                deleted: vec![full_path],
                ..Default::default()
            }
        }
        Ok(404) if args.force => Removal::default(),
        Ok(404) => {
            formatter.error(&format!("Object not found: {full_path}"));
            Removal {
                failed: vec![full_path],
                code: Some(ExitCode::NotFound),
                ..Default::default()
            }
        }
        Ok(status) => {
            formatter.error(&format!("Failed to remove {full_path}: HTTP {status}"));
            Removal {
                failed: vec![full_path],
                code: Some(ExitCode::from_status(status)),
                ..Default::default()
            }
        }
        Err(e) => {
            let code = fail(formatter, &format!("Failed to remove {full_path}"), &e);
            Removal {
                failed: vec![full_path],
                code: Some(code),
                ..Default::default()
            }
        }
    }
}

async fn remove_prefix(
    client: &SwiftClient,
    target: &RemotePath,
    args: &RmArgs,
    formatter: &Formatter,
) -> Removal {
    let objects = match client.list_objects(&target.container).await {
        Ok(objects) => objects,
        Err(e) => {
            let code = fail(formatter, &format!("Failed to list '{}'", target.container), &e);
            return Removal::failure(code);
        }
    };

    let names: Vec<String> = objects
        .into_iter()
        .map(|o| o.name)
        .filter(|name| !name.is_empty() && name.starts_with(&target.object))
        .collect();

    if names.is_empty() {
        if !args.force {
            formatter.warning(&format!("No objects found matching prefix: {target}"));
        }
        return Removal::default();
    }

    let mut removal = Removal::default();
    for name in names {
        let object = RemotePath::new(&target.alias, &target.container, name);
        let single = remove_single(client, &object, args, formatter).await;
        removal.deleted.extend(single.deleted);
        removal.failed.extend(single.failed);
        if single.code.is_some() {
            removal.code = single.code;
        }
    }
    removal
}

/// Parse an rm path; only recursive removal may target a prefix
fn parse_rm_path(path: &str, recursive: bool) -> Result<RemotePath, String> {
    let remote = parse_remote_path(path).map_err(|e| e.to_string())?;
    if remote.is_dir && !recursive {
        return Err(format!(
            "'{path}' is a container or prefix. Use -r/--recursive to remove its objects."
        ));
    }
    Ok(remote)
}
