//! Command-line paths and storage URL composition
//!
//! `alias/container[/object]` names a Swift location; anything that cannot be
//! one (absolute, `./`, `../`, a bare file name) is a local path.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Join URL segments with `/`.
///
/// No normalization happens: segments are not trimmed, percent-encoded or
/// elided, so an empty segment yields a double slash. Callers supply clean
/// segments.
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("/")
}

/// `alias/container[/object]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    pub alias: String,
    pub container: String,
    /// Empty when the path names the container itself
    pub object: String,
    /// Container root, or an object name ending in `/` (pseudo-directory)
    pub is_dir: bool,
}

impl RemotePath {
    pub fn new(
        alias: impl Into<String>,
        container: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        let object = object.into();
        Self {
            alias: alias.into(),
            container: container.into(),
            is_dir: object.is_empty() || object.ends_with('/'),
            object,
        }
    }

    pub fn to_full_path(&self) -> String {
        if self.object.is_empty() {
            join_path(&[&self.alias, &self.container])
        } else {
            join_path(&[&self.alias, &self.container, &self.object])
        }
    }

    /// Last component of the object name
    pub fn file_name(&self) -> Option<&str> {
        self.object
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_full_path())
    }
}

/// A command-line path argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPath {
    Local(PathBuf),
    Remote(RemotePath),
}

/// Classify a path argument as local or remote
///
/// A first segment that is not a valid alias name makes the path local, as
/// does a single segment containing `.` or `\`. A single bare word is an
/// incomplete remote path.
pub fn parse_path(path: &str) -> Result<ParsedPath> {
    if path.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }
    let local = || Ok(ParsedPath::Local(PathBuf::from(path)));

    if path.starts_with('/') || path.starts_with("./") || path.starts_with("../") {
        return local();
    }
    #[cfg(windows)]
    if path.as_bytes().get(1) == Some(&b':') {
        return local();
    }

    let Some((alias, rest)) = path.split_once('/') else {
        if path.contains('.') || path.contains('\\') {
            return local();
        }
        return Err(Error::InvalidPath(format!(
            "Path '{path}' is incomplete. Use format: alias/container[/object]"
        )));
    };
    if !is_valid_alias_name(alias) {
        return local();
    }

    let (container, object) = rest.split_once('/').unwrap_or((rest, ""));
    if container.is_empty() {
        return Err(Error::InvalidPath("Container name cannot be empty".into()));
    }
    Ok(ParsedPath::Remote(RemotePath::new(alias, container, object)))
}

/// Like [`parse_path`], but a local path is an error
pub fn parse_remote_path(path: &str) -> Result<RemotePath> {
    match parse_path(path)? {
        ParsedPath::Remote(remote) => Ok(remote),
        ParsedPath::Local(_) => Err(Error::InvalidPath(format!(
            "'{path}' is not a remote path. Use format: alias/container[/object]"
        ))),
    }
}

/// Letters, digits, `-` and `_`; at least one character
pub fn is_valid_alias_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
