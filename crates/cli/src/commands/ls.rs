//! ls command - List containers and objects
//!
//! Lists the account's containers when given an alias only, or the objects of
//! a container when given a container path. A trailing object part filters
//! the listing by name prefix.

use clap::Args;
use serde::Serialize;
use swc_core::{ContainerInfo, ObjectInfo, ObjectStore as _};
use swc_swift::SwiftClient;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List containers or objects
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Remote path (alias/ or alias/container[/prefix])
    pub path: String,

    /// Summarize output (show totals only)
    #[arg(long)]
    pub summarize: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput<T> {
    items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

impl Summary {
    fn new(total: usize, total_size_bytes: u64) -> Self {
        Self {
            total,
            total_size_bytes,
            total_size_human: humansize::format_size(total_size_bytes, humansize::BINARY),
        }
    }
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (alias_name, container, prefix) = match parse_ls_path(&args.path) {
        Ok(parsed) => parsed,
        Err(e) => {
            formatter.error(&e);
            return ExitCode::UsageError;
        }
    };

    let client = match connect(&alias_name, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    match container {
        None => list_containers(&client, &formatter, args.summarize).await,
        Some(container) => {
            list_objects(&client, &container, prefix.as_deref(), &formatter, args.summarize).await
        }
    }
}

async fn list_containers(client: &SwiftClient, formatter: &Formatter, summarize: bool) -> ExitCode {
    let containers: Vec<ContainerInfo> = match client.list_containers().await {
        Ok(containers) => containers,
        Err(e) => return fail(formatter, "Failed to list containers", &e),
    };
    let total_size = containers.iter().map(|c| c.bytes).sum();
    let summary = summarize.then(|| Summary::new(containers.len(), total_size));

    if formatter.is_json() {
        formatter.json(&LsOutput {
            items: containers,
            summary,
        });
        return ExitCode::Success;
    }

    if !summarize {
        for container in &containers {
            formatter.println(&format!(
                "{:>10} {:>8} {}/",
                container.size_human(),
                container.count,
                container.name
            ));
        }
    }
    if let Some(summary) = summary {
        formatter.println(&format!(
            "Total: {} containers, {}",
            summary.total, summary.total_size_human
        ));
    }
    ExitCode::Success
}

async fn list_objects(
    client: &SwiftClient,
    container: &str,
    prefix: Option<&str>,
    formatter: &Formatter,
    summarize: bool,
) -> ExitCode {
    let objects = match client.list_objects(container).await {
        Ok(objects) => objects,
        Err(e) => return fail(formatter, &format!("Failed to list '{container}'"), &e),
    };
    let objects = filter_prefix(objects, prefix);
    let total_size = objects.iter().map(|o| o.bytes).sum();
    let summary = summarize.then(|| Summary::new(objects.len(), total_size));

    if formatter.is_json() {
        formatter.json(&LsOutput {
            items: objects,
            summary,
        });
        return ExitCode::Success;
    }

    if !summarize {
        for object in &objects {
            formatter.println(&format_object_line(object));
        }
    }
    if let Some(summary) = summary {
        formatter.println(&format!(
            "Total: {} objects, {}",
            summary.total, summary.total_size_human
        ));
    }
    ExitCode::Success
}

fn format_object_line(object: &ObjectInfo) -> String {
    let date = format_date(object.last_modified_at());
    format!("[{date}] {:>10} {}", object.size_human(), object.name)
}

/// Fixed-width timestamp column; blank when the listing had no date
fn format_date(date: Option<jiff::civil::DateTime>) -> String {
    match date {
        Some(date) => date.strftime("%Y-%m-%d %H:%M:%S").to_string(),
        None => " ".repeat(19),
    }
}

fn filter_prefix(objects: Vec<ObjectInfo>, prefix: Option<&str>) -> Vec<ObjectInfo> {
    match prefix {
        Some(prefix) => objects
            .into_iter()
            .filter(|o| o.name.starts_with(prefix))
            .collect(),
        None => objects,
    }
}

/// Parse ls path into (alias, container, prefix)
fn parse_ls_path(path: &str) -> Result<(String, Option<String>, Option<String>), String> {
    if path.trim_end_matches('/').is_empty() {
        return Err("Path cannot be empty".to_string());
    }

    let mut parts = path.splitn(3, '/');
    let alias = parts.next().unwrap_or_default().to_string();
    let container = parts.next().filter(|c| !c.is_empty()).map(str::to_string);
    let prefix = parts.next().filter(|p| !p.is_empty()).map(str::to_string);

    if container.is_none() && prefix.is_some() {
        return Err(format!("Invalid path format: {path}"));
    }
    Ok((alias, container, prefix))
}
