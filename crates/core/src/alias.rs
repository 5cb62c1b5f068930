//! Named Swift accounts
//!
//! An alias pairs an auth endpoint with the credentials that exchange for a
//! token and a storage URL. Aliases are stored in `config.toml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigManager, DEFAULT_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::path::is_valid_alias_name;

/// KeyStone v3 domain used when none is configured
pub const DEFAULT_DOMAIN: &str = "default";

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

/// What an authenticator needs to obtain a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// tempauth `.../auth/v1.0` or KeyStone `.../tokens`
    pub auth_uri: String,
    pub username: String,
    /// Password or key
    pub password: String,
    /// Tenant (v2) or project (v3); `None` selects tempauth
    pub tenant_name: Option<String>,
    pub domain: String,
}

impl Credentials {
    /// tempauth credentials; see [`Credentials::with_tenant`] for KeyStone
    pub fn new(
        auth_uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            auth_uri: auth_uri.into(),
            username: username.into(),
            password: password.into(),
            tenant_name: None,
            domain: default_domain(),
        }
    }

    pub fn with_tenant(mut self, tenant_name: impl Into<String>) -> Self {
        self.tenant_name = Some(tenant_name.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }
}

/// One `[[aliases]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    pub auth_uri: String,
    pub username: String,
    pub password: String,

    /// tempauth when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,

    #[serde(default = "default_domain")]
    pub domain: String,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,

    /// Per-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Alias {
    pub fn new(
        name: impl Into<String>,
        auth_uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            auth_uri: auth_uri.into(),
            username: username.into(),
            password: password.into(),
            tenant_name: None,
            domain: default_domain(),
            insecure: false,
            timeout_secs: None,
        }
    }

    /// Reject aliases that could never authenticate
    ///
    /// The auth URI must be an absolute `http` or `https` URL.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_alias_name(&self.name) {
            return Err(Error::Validation(format!(
                "invalid alias name '{}': use letters, digits, '-' and '_'",
                self.name
            )));
        }
        let url = url::Url::parse(&self.auth_uri)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Validation(format!(
                "auth URL scheme must be http or https, not {}",
                url.scheme()
            )));
        }
        if self.tenant_name.as_deref() == Some("") {
            return Err(Error::Validation("tenant name cannot be empty".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::Validation(
                "timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            auth_uri: self.auth_uri.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            tenant_name: self.tenant_name.clone(),
            domain: self.domain.clone(),
        }
    }

    /// Request timeout with the built-in fallback
    pub fn timeout(&self) -> Duration {
        self.timeout_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Request timeout, falling back to `default_secs` when the alias has none
    pub fn timeout_or(&self, default_secs: u64) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(default_secs))
    }

    pub fn uses_keystone(&self) -> bool {
        self.tenant_name.is_some()
    }
}

/// Reads and edits the aliases in a config file
pub struct AliasManager {
    config: ConfigManager,
}

impl AliasManager {
    pub fn new() -> Result<Self> {
        ConfigManager::new().map(Self::with_config_manager)
    }

    pub fn with_config_manager(config: ConfigManager) -> Self {
        Self { config }
    }

    pub fn list(&self) -> Result<Vec<Alias>> {
        Ok(self.config.load()?.aliases)
    }

    pub fn get(&self, name: &str) -> Result<Alias> {
        self.list()?
            .into_iter()
            .find(|alias| alias.name == name)
            .ok_or_else(|| Error::AliasNotFound(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|alias| alias.name == name))
    }

    /// Validate and store an alias, replacing one with the same name
    pub fn set(&self, alias: Alias) -> Result<()> {
        alias.validate()?;
        self.update(|config| {
            match config.aliases.iter_mut().find(|a| a.name == alias.name) {
                Some(existing) => *existing = alias,
                None => config.aliases.push(alias),
            }
            Ok(())
        })
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        self.update(|config| {
            let index = config
                .aliases
                .iter()
                .position(|alias| alias.name == name)
                .ok_or_else(|| Error::AliasNotFound(name.to_string()))?;
            config.aliases.remove(index);
            Ok(())
        })
    }

    /// Load, edit and save; nothing is written when `edit` fails
    fn update(&self, edit: impl FnOnce(&mut Config) -> Result<()>) -> Result<()> {
        let mut config = self.config.load()?;
        edit(&mut config)?;
        self.config.save(&config)
    }
}
