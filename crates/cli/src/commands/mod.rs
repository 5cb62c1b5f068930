//! CLI command definitions and execution
//!
//! Each command parses its paths, connects through [`connect`] and reports
//! through the shared [`Formatter`].

use clap::{Parser, Subcommand};
use swc_core::{ConfigManager, Error, RemotePath, parse_remote_path};
use swc_swift::SwiftClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod alias;
mod cat;
mod cp;
mod ls;
mod mb;
mod mv;
mod pipe;
mod rb;
mod rm;
mod stat;

/// swc - Swift object storage client
///
/// A command-line interface for OpenStack Swift accounts, authenticating
/// with tempauth or KeyStone v2/v3.
#[derive(Parser, Debug)]
#[command(name = "swc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage Swift account aliases
    #[command(subcommand)]
    Alias(alias::AliasCommands),

    /// List containers and objects
    Ls(ls::LsArgs),

    /// Create a container
    Mb(mb::MbArgs),

    /// Remove a container
    Rb(rb::RbArgs),

    /// Display object contents
    Cat(cat::CatArgs),

    /// Show container or object metadata
    Stat(stat::StatArgs),

    /// Copy objects (local<->Swift, server-side within a container)
    Cp(cp::CpArgs),

    /// Move objects within a container (copy + delete source)
    Mv(mv::MvArgs),

    /// Remove objects
    Rm(rm::RmArgs),

    /// Stream stdin to an object
    Pipe(pipe::PipeArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let defaults = ConfigManager::new()
        .and_then(|manager| manager.load())
        .map(|config| config.defaults)
        .unwrap_or_default();
    let output_config = OutputConfig::resolve(
        cli.json,
        cli.no_color,
        cli.no_progress,
        cli.quiet,
        &defaults,
    );

    match cli.command {
        Commands::Alias(cmd) => alias::execute(cmd, output_config).await,
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Mb(args) => mb::execute(args, output_config).await,
        Commands::Rb(args) => rb::execute(args, output_config).await,
        Commands::Cat(args) => cat::execute(args, output_config).await,
        Commands::Stat(args) => stat::execute(args, output_config).await,
        Commands::Cp(args) => cp::execute(args, output_config).await,
        Commands::Mv(args) => mv::execute(args, output_config).await,
        Commands::Rm(args) => rm::execute(args, output_config).await,
        Commands::Pipe(args) => pipe::execute(args, output_config).await,
    }
}

/// Report an error and map it to its exit code
pub(crate) fn fail(formatter: &Formatter, context: &str, err: &Error) -> ExitCode {
    formatter.error(&format!("{context}: {err}"));
    ExitCode::from(err)
}

/// Load an alias and authenticate against it
///
/// The request timeout comes from the alias, else from `[defaults]`.
pub(crate) async fn connect(
    alias_name: &str,
    formatter: &Formatter,
) -> Result<SwiftClient, ExitCode> {
    let config = ConfigManager::new()
        .and_then(|manager| manager.load())
        .map_err(|e| fail(formatter, "Failed to load configuration", &e))?;

    let Some(alias) = config.aliases.iter().find(|a| a.name == alias_name) else {
        formatter.error(&format!("Alias '{alias_name}' not found"));
        return Err(ExitCode::NotFound);
    };

    let timeout = alias.timeout_or(config.defaults.timeout_secs);
    tracing::debug!(alias = alias_name, ?timeout, "connecting");

    let client = SwiftClient::connect_with_timeout(alias, timeout)
        .await
        .map_err(|e| fail(formatter, &format!("Failed to authenticate '{alias_name}'"), &e))?;

    // tempauth reports bad credentials only by leaving the headers out
    if client.session().base_uri().is_empty() {
        formatter.error(&format!(
            "Failed to authenticate '{alias_name}': server returned no storage URL"
        ));
        return Err(ExitCode::AuthError);
    }

    Ok(client)
}

/// Parse an `alias/container` target that must not name an object
pub(crate) fn parse_container_path(path: &str) -> Result<RemotePath, String> {
    let remote = parse_remote_path(path).map_err(|e| e.to_string())?;
    if !remote.object.is_empty() {
        return Err(format!("'{path}' names an object. Use format: alias/container"));
    }
    Ok(remote)
}

/// Parse an `alias/container/object` path
pub(crate) fn parse_object_path(path: &str) -> Result<RemotePath, String> {
    let remote = parse_remote_path(path).map_err(|e| e.to_string())?;
    if remote.object.is_empty() || remote.object.ends_with('/') {
        return Err(format!(
            "Invalid path format: '{path}'. Expected: alias/container/object"
        ));
    }
    Ok(remote)
}

/// Report a non-2xx status from a mutating operation
pub(crate) fn fail_status(formatter: &Formatter, context: &str, status: u16) -> ExitCode {
    formatter.error(&format!("{context}: HTTP {status}"));
    ExitCode::from_status(status)
}
