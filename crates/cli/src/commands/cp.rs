//! cp command - Copy objects
//!
//! Uploads a local file, downloads an object, or copies an object server-side
//! within one container.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use swc_core::{ObjectStore as _, ParsedPath, RemotePath, UploadSource, is_success, parse_path};
use swc_swift::SwiftClient;

use super::{connect, fail, fail_status};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Copy objects
#[derive(Args, Debug)]
pub struct CpArgs {
    /// Source path (local path or alias/container/object)
    pub source: String,

    /// Destination path (local path or alias/container[/object])
    pub target: String,

    /// Do not overwrite an existing local file
    #[arg(short = 'n', long)]
    pub no_clobber: bool,

    /// Only show what would be copied (dry run)
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct CpOutput {
    status: &'static str,
    source: String,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_human: Option<String>,
}

impl CpOutput {
    fn new(source: String, target: String, size: Option<u64>) -> Self {
        Self {
            status: "success",
            source,
            target,
            size_bytes: size,
            size_human: size.map(|s| humansize::format_size(s, humansize::BINARY)),
        }
    }

    fn report(&self, formatter: &Formatter) {
        if formatter.is_json() {
            formatter.json(self);
        } else if let Some(size) = &self.size_human {
            formatter.println(&format!("{} -> {} ({size})", self.source, self.target));
        } else {
            formatter.println(&format!("{} -> {}", self.source, self.target));
        }
    }
}

/// Execute the cp command
pub async fn execute(args: CpArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let source = match parse_path(&args.source) {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&format!("Invalid source path: {e}"));
            return ExitCode::UsageError;
        }
    };

    let target = match parse_path(&args.target) {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&format!("Invalid target path: {e}"));
            return ExitCode::UsageError;
        }
    };

    match (&source, &target) {
        (ParsedPath::Local(src), ParsedPath::Remote(dst)) => {
            upload_file(src, dst, &args, &formatter).await
        }
        (ParsedPath::Remote(src), ParsedPath::Local(dst)) => {
            download_file(src, dst, &args, &formatter).await
        }
        (ParsedPath::Remote(src), ParsedPath::Remote(dst)) => {
            copy_remote(src, dst, &args, &formatter).await
        }
        (ParsedPath::Local(_), ParsedPath::Local(_)) => {
            formatter.error("Cannot copy between two local paths. Use system cp command.");
            ExitCode::UsageError
        }
    }
}

/// Object name for an upload: a destination ending in `/` takes the file name
fn upload_object_name(src: &Path, dst: &RemotePath) -> Option<String> {
    if !dst.is_dir {
        return Some(dst.object.clone());
    }
    let file_name = src.file_name()?.to_string_lossy();
    Some(format!("{}{file_name}", dst.object))
}

async fn upload_file(
    src: &Path,
    dst: &RemotePath,
    args: &CpArgs,
    formatter: &Formatter,
) -> ExitCode {
    if !src.is_file() {
        formatter.error(&format!("Source is not a file: {}", src.display()));
        return if src.exists() {
            ExitCode::UsageError
        } else {
            ExitCode::NotFound
        };
    }

    let Some(object) = upload_object_name(src, dst) else {
        formatter.error(&format!("Cannot derive an object name from {}", src.display()));
        return ExitCode::UsageError;
    };
    let src_display = src.display().to_string();
    let dst_display = RemotePath::new(&dst.alias, &dst.container, &object).to_full_path();

    if args.dry_run {
        formatter.println(&format!("Would copy: {src_display} -> {dst_display}"));
        return ExitCode::Success;
    }

    let client = match connect(&dst.alias, formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let size = std::fs::metadata(src).map(|m| m.len()).ok();
    let spinner = ProgressBar::spinner(formatter.config(), &format!("Uploading {src_display}"));
    let result = client
        .create_object(
            &dst.container,
            UploadSource::LocalFile(src.to_path_buf()),
            Some(object),
        )
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(status) if is_success(status) => {
            CpOutput::new(src_display, dst_display, size).report(formatter);
            ExitCode::Success
        }
        Ok(status) => fail_status(formatter, &format!("Failed to upload {src_display}"), status),
        Err(e) => fail(formatter, &format!("Failed to upload {src_display}"), &e),
    }
}

/// Local file for a download: a directory destination takes the object's file name
fn download_target(src: &RemotePath, dst: &Path) -> Option<PathBuf> {
    if dst.is_dir() || dst.to_string_lossy().ends_with('/') {
        return src.file_name().map(|name| dst.join(name));
    }
    Some(dst.to_path_buf())
}

async fn download_file(
    src: &RemotePath,
    dst: &Path,
    args: &CpArgs,
    formatter: &Formatter,
) -> ExitCode {
    if src.is_dir {
        formatter.error(&format!("Source must name an object: {src}"));
        return ExitCode::UsageError;
    }
    let Some(dst_path) = download_target(src, dst) else {
        formatter.error(&format!("Cannot derive a file name from {src}"));
        return ExitCode::UsageError;
    };
    let src_display = src.to_full_path();
    let dst_display = dst_path.display().to_string();

    if args.dry_run {
        formatter.println(&format!("Would copy: {src_display} -> {dst_display}"));
        return ExitCode::Success;
    }

    if args.no_clobber && dst_path.exists() {
        formatter.error(&format!("Destination exists: {dst_display}"));
        return ExitCode::Conflict;
    }

    let client = match connect(&src.alias, formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(formatter.config(), &format!("Downloading {src_display}"));
    let result = client.retrieve_object(&src.container, &src.object).await;
    spinner.finish_and_clear();

    let data = match result {
        Ok((true, data)) => data,
        Ok((false, _)) => {
            formatter.error(&format!("Object not found: {src_display}"));
            return ExitCode::NotFound;
        }
        Err(e) => return fail(formatter, &format!("Failed to download {src_display}"), &e),
    };

    if let Some(parent) = dst_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            formatter.error(&format!("Failed to create directory: {e}"));
            return ExitCode::GeneralError;
        }
    }
    if let Err(e) = std::fs::write(&dst_path, &data) {
        formatter.error(&format!("Failed to write {dst_display}: {e}"));
        return ExitCode::GeneralError;
    }

    CpOutput::new(src_display, dst_display, Some(data.len() as u64)).report(formatter);
    ExitCode::Success
}

/// Destination object name of a server-side copy
///
/// Swift copies only within one account here, and this client only within
/// one container.
pub(super) fn remote_copy_target(src: &RemotePath, dst: &RemotePath) -> Result<String, ExitCode> {
    if src.alias != dst.alias || src.container != dst.container {
        return Err(ExitCode::UnsupportedFeature);
    }
    if src.is_dir {
        return Err(ExitCode::UsageError);
    }
    if !dst.is_dir {
        return Ok(dst.object.clone());
    }
    match src.file_name() {
        Some(name) => Ok(format!("{}{name}", dst.object)),
        None => Err(ExitCode::UsageError),
    }
}

/// Report why a server-side copy cannot be done
pub(super) fn report_copy_target_error(
    formatter: &Formatter,
    code: ExitCode,
    src: &RemotePath,
    dst: &RemotePath,
) -> ExitCode {
    match code {
        ExitCode::UnsupportedFeature => formatter.error(&format!(
            "Cannot copy {src} to {dst}: server-side copy works within one container only"
        )),
        _ => formatter.error(&format!("Source must name an object: {src}")),
    }
    code
}

/// Server-side copy; returns the destination's display path on success
pub(super) async fn server_copy(
    client: &SwiftClient,
    src: &RemotePath,
    dest: &str,
    formatter: &Formatter,
) -> Result<String, ExitCode> {
    let dst_display = RemotePath::new(&src.alias, &src.container, dest).to_full_path();
    match client.copy_object(&src.container, &src.object, dest).await {
        Ok(status) if is_success(status) => Ok(dst_display),
        Ok(404) => {
            formatter.error(&format!("Object not found: {src}"));
            Err(ExitCode::NotFound)
        }
        Ok(status) => Err(fail_status(formatter, &format!("Failed to copy {src}"), status)),
        Err(e) => Err(fail(formatter, &format!("Failed to copy {src}"), &e)),
    }
}

async fn copy_remote(
    src: &RemotePath,
    dst: &RemotePath,
    args: &CpArgs,
    formatter: &Formatter,
) -> ExitCode {
    let dest = match remote_copy_target(src, dst) {
        Ok(dest) => dest,
        Err(code) => return report_copy_target_error(formatter, code, src, dst),
    };

    if args.dry_run {
        formatter.println(&format!(
            "Would copy: {src} -> {}",
            RemotePath::new(&src.alias, &src.container, &dest)
        ));
        return ExitCode::Success;
    }

    let client = match connect(&src.alias, formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    match server_copy(&client, src, &dest, formatter).await {
        Ok(dst_display) => {
            CpOutput::new(src.to_full_path(), dst_display, None).report(formatter);
            ExitCode::Success
        }
        Err(code) => code,
    }
}
