//! Alias management commands
//!
//! Aliases are named Swift accounts: an auth endpoint plus the credentials
//! for tempauth or KeyStone.

use clap::Subcommand;
use serde::Serialize;
use swc_core::alias::DEFAULT_DOMAIN;
use swc_core::{Alias, AliasManager, Error};
use swc_swift::AuthVersion;

use super::fail;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Alias subcommands for managing Swift accounts
#[derive(Subcommand, Debug)]
pub enum AliasCommands {
    /// Add or update an alias
    Set(SetArgs),

    /// List all configured aliases
    List(ListArgs),

    /// Remove an alias
    Remove(RemoveArgs),
}

/// Arguments for the `alias set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Alias name (e.g., "swift", "prod")
    pub name: String,

    /// Auth URL (e.g., "https://swift.example.org/auth/v1.0",
    /// "https://keystone.example.org/v3/auth/tokens")
    pub auth_uri: String,

    /// User name
    pub username: String,

    /// Password or key
    pub password: String,

    /// KeyStone tenant/project; tempauth is used without it
    #[arg(long)]
    pub tenant: Option<String>,

    /// KeyStone v3 domain of user and project
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Allow insecure TLS connections
    #[arg(long, default_value = "false")]
    pub insecure: bool,
}

/// Arguments for the `alias list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show full details including auth method
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `alias remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the alias to remove
    pub name: String,
}

/// JSON output for alias list
#[derive(Serialize)]
struct AliasListOutput {
    aliases: Vec<AliasInfo>,
}

/// Alias information for output (without the password)
#[derive(Serialize)]
struct AliasInfo {
    name: String,
    auth_uri: String,
    username: String,
    auth: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<String>,
    insecure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

impl From<&Alias> for AliasInfo {
    fn from(alias: &Alias) -> Self {
        let auth = match AuthVersion::detect(&alias.credentials()) {
            AuthVersion::TempAuth => "tempauth",
            AuthVersion::KeystoneV2 => "keystone-v2",
            AuthVersion::KeystoneV3 => "keystone-v3",
        };
        Self {
            name: alias.name.clone(),
            auth_uri: alias.auth_uri.clone(),
            username: alias.username.clone(),
            auth,
            tenant: alias.tenant_name.clone(),
            insecure: alias.insecure,
            timeout_secs: alias.timeout_secs,
        }
    }
}

/// JSON output for alias set/remove operations
#[derive(Serialize)]
struct AliasOperationOutput {
    success: bool,
    alias: String,
    message: String,
}

/// Execute an alias subcommand
pub async fn execute(cmd: AliasCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let alias_manager = match AliasManager::new() {
        Ok(am) => am,
        Err(e) => return fail(&formatter, "Failed to load aliases", &e),
    };

    match cmd {
        AliasCommands::Set(args) => execute_set(args, &alias_manager, &formatter),
        AliasCommands::List(args) => execute_list(args, &alias_manager, &formatter),
        AliasCommands::Remove(args) => execute_remove(args, &alias_manager, &formatter),
    }
}

/// Build the alias from arguments and reject it before anything is saved
fn build_alias(args: SetArgs) -> Result<Alias, String> {
    let mut alias = Alias::new(args.name, args.auth_uri, args.username, args.password);
    alias.tenant_name = args.tenant;
    alias.domain = args.domain;
    alias.timeout_secs = args.timeout;
    alias.insecure = args.insecure;

    match alias.validate() {
        Ok(()) => Ok(alias),
        Err(Error::InvalidUrl(e)) => Err(format!("Invalid auth URL '{}': {e}", alias.auth_uri)),
        Err(e) => Err(e.to_string()),
    }
}

fn execute_set(args: SetArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    let alias = match build_alias(args) {
        Ok(alias) => alias,
        Err(msg) => {
            formatter.error(&msg);
            return ExitCode::UsageError;
        }
    };
    let name = alias.name.clone();

    match manager.set(alias) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&AliasOperationOutput {
                    success: true,
                    alias: name.clone(),
                    message: format!("Alias '{name}' configured successfully"),
                });
            } else {
                formatter.success(&format!("Alias '{name}' configured successfully."));
            }
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to save alias", &e),
    }
}

fn execute_list(args: ListArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    let aliases = match manager.list() {
        Ok(aliases) => aliases,
        Err(e) => return fail(formatter, "Failed to load aliases", &e),
    };

    if formatter.is_json() {
        formatter.json(&AliasListOutput {
            aliases: aliases.iter().map(AliasInfo::from).collect(),
        });
    } else if aliases.is_empty() {
        formatter.println("No aliases configured.");
    } else {
        for alias in aliases.iter().map(AliasInfo::from) {
            if args.long {
                let tenant = alias.tenant.as_deref().unwrap_or("-");
                formatter.println(&format!(
                    "{:<12} {} (auth: {}, user: {}, tenant: {tenant})",
                    alias.name, alias.auth_uri, alias.auth, alias.username
                ));
            } else {
                formatter.println(&format!("{:<12} {}", alias.name, alias.auth_uri));
            }
        }
    }
    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&AliasOperationOutput {
                    success: true,
                    alias: args.name.clone(),
                    message: format!("Alias '{}' removed successfully", args.name),
                });
            } else {
                formatter.success(&format!("Alias '{}' removed successfully.", args.name));
            }
            ExitCode::Success
        }
        Err(Error::AliasNotFound(_)) => {
            formatter.error(&format!("Alias '{}' not found", args.name));
            ExitCode::NotFound
        }
        Err(e) => fail(formatter, "Failed to remove alias", &e),
    }
}
