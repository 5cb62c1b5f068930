//! The `config.toml` file
//!
//! Lives in `$SWC_CONFIG_DIR` when set, else in `<platform config dir>/swc/`.
//! Holds the `[defaults]` table and the `[[aliases]]` list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alias::Alias;
use crate::error::{Error, Result};

/// Version written into new files; older files are upgraded on load
pub const SCHEMA_VERSION: u32 = 1;

/// Overrides the directory holding `config.toml`
pub const CONFIG_DIR_ENV: &str = "SWC_CONFIG_DIR";

/// Request timeout used when neither the alias nor the defaults set one
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

const FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub schema_version: u32,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub aliases: Vec<Alias>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            aliases: Vec::new(),
        }
    }
}

/// `[defaults]` table; command-line flags take precedence
///
/// Missing keys fall back to [`Defaults::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// `human` or `json`
    pub output: String,
    /// `auto`, `always` or `never`
    pub color: String,
    pub progress: bool,
    /// Applies to aliases without their own timeout
    pub timeout_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: "human".into(),
            color: "auto".into(),
            progress: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Reads and writes one `config.toml`
#[derive(Debug)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Locate the config file for the current user
    pub fn new() -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .map(|base| base.join("swc"))
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?,
        };
        Ok(Self::with_path(dir.join(FILE_NAME)))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// Read the file, or return an empty config when it does not exist yet
    pub fn load(&self) -> Result<Config> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)?;

        match config.schema_version {
            SCHEMA_VERSION => Ok(config),
            older if older < SCHEMA_VERSION => Ok(upgrade(config)),
            newer => Err(Error::Config(format!(
                "Configuration file version {newer} is newer than supported version \
                 {SCHEMA_VERSION}. Please upgrade swc."
            ))),
        }
    }

    /// Write the file with owner-only permissions, creating its directory
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, toml::to_string_pretty(config)?)?;
        restrict_permissions(&self.path)
    }
}

fn upgrade(mut config: Config) -> Config {
    tracing::debug!(
        from = config.schema_version,
        to = SCHEMA_VERSION,
        "upgrading configuration file"
    );
    // Version 0 had no [defaults] table; serde already filled it in.
    config.schema_version = SCHEMA_VERSION;
    config
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
