//! Library error type
//!
//! Every variant knows the process exit code the CLI reports for it.

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by the HTTP layer
pub type TransportError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed `alias/container/object` path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Alias not found: {0}")]
    AliasNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Undecodable listing or KeyStone response body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Rejected credentials, or a token response without token or endpoint
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Empty container or object name, bad alias settings
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Connect, TLS or timeout failure; the HTTP client's error is the source
    #[error("Network error: {0}")]
    Transport(#[source] TransportError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    General(String),
}

impl Error {
    /// Wrap an HTTP client error without losing it
    pub fn transport(err: impl StdError + Send + Sync + 'static) -> Self {
        Error::Transport(Box::new(err))
    }

    /// Exit code reported by the CLI
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_)
            | Error::Validation(_)
            | Error::Config(_)
            | Error::InvalidUrl(_) => 2,
            Error::Transport(_) => 3,
            Error::Auth(_) => 4,
            Error::NotFound(_) | Error::AliasNotFound(_) => 5,
            Error::Conflict(_) => 6,
            Error::Io(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::Json(_)
            | Error::General(_) => 1,
        }
    }

    /// Whether a transport failure was a timeout
    ///
    /// Walks the source chain looking for `io::ErrorKind::TimedOut` or a
    /// "timed out" message, since reqwest wraps the underlying cause.
    pub fn is_timeout(&self) -> bool {
        let Error::Transport(source) = self else {
            return false;
        };
        let mut current: Option<&(dyn StdError + 'static)> = Some(source.as_ref());
        while let Some(err) = current {
            let io_timeout = err
                .downcast_ref::<io::Error>()
                .is_some_and(|io| io.kind() == io::ErrorKind::TimedOut);
            if io_timeout || err.to_string().contains("timed out") {
                return true;
            }
            current = err.source();
        }
        false
    }
}
