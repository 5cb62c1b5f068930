//! stat command - Show container or object metadata
//!
//! Reads the headers of a `HEAD` request on the container or object.

use std::collections::BTreeMap;

use clap::Args;
use swc_core::{ContainerMetadata, ObjectMetadata, ObjectStore as _, parse_remote_path};

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show container or object metadata
#[derive(Args, Debug)]
pub struct StatArgs {
    /// Container or object path (alias/container[/object])
    pub path: String,
}

/// Execute the stat command
pub async fn execute(args: StatArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote_path(&args.path) {
        Ok(path) if path.object.ends_with('/') => {
            formatter.error(&format!(
                "Invalid path format: '{}'. Expected: alias/container[/object]",
                args.path
            ));
            return ExitCode::UsageError;
        }
        Ok(path) => path,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let client = match connect(&path.alias, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    if path.object.is_empty() {
        match client.container_metadata(&path.container).await {
            Ok(meta) => print_container(&formatter, &meta),
            Err(e) => return fail(&formatter, "Failed to stat container", &e),
        }
    } else {
        match client.object_metadata(&path.container, &path.object).await {
            Ok(meta) => print_object(&formatter, &meta),
            Err(e) => return fail(&formatter, "Failed to stat object", &e),
        }
    }
    ExitCode::Success
}

fn print_container(formatter: &Formatter, meta: &ContainerMetadata) {
    if formatter.is_json() {
        formatter.json(meta);
        return;
    }
    formatter.field("Name", &meta.name);
    if let Some(count) = meta.object_count {
        formatter.field("Objects", count);
    }
    if let Some(bytes) = meta.bytes_used {
        formatter.field("Size", humansize::format_size(bytes, humansize::BINARY));
    }
    print_user_metadata(formatter, &meta.metadata);
}

fn print_object(formatter: &Formatter, meta: &ObjectMetadata) {
    if formatter.is_json() {
        formatter.json(meta);
        return;
    }
    formatter.field("Name", &meta.name);
    if let Some(modified) = &meta.last_modified {
        formatter.field("Date", modified);
    }
    if let Some(size) = meta.content_length {
        let human = humansize::format_size(size, humansize::BINARY);
        formatter.field("Size", format!("{human} ({size} bytes)"));
    }
    if let Some(etag) = &meta.etag {
        formatter.field("ETag", etag);
    }
    if let Some(content_type) = &meta.content_type {
        formatter.field("Type", content_type);
    }
    print_user_metadata(formatter, &meta.metadata);
}

fn print_user_metadata(formatter: &Formatter, metadata: &BTreeMap<String, String>) {
    if metadata.is_empty() {
        return;
    }
    formatter.field("Metadata", "");
    for (key, value) in metadata {
        formatter.println(&format!("  {key}: {value}"));
    }
}
