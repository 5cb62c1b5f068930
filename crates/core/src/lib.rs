//! swc-core: Core library for the swc Swift client
//!
//! This crate provides the core functionality for swc, including:
//! - Configuration management
//! - Alias management
//! - Path parsing and URL composition
//! - ObjectStore trait for container and object operations
//!
//! This crate does no HTTP itself; the Swift adapter lives in `swc-swift`.

pub mod alias;
pub mod config;
pub mod error;
pub mod path;
pub mod store;
pub mod traits;

pub use alias::{Alias, AliasManager, Credentials};
pub use config::{Config, ConfigManager, DEFAULT_TIMEOUT_SECS};
pub use error::{Error, Result};
pub use path::{ParsedPath, RemotePath, join_path, parse_path, parse_remote_path};
pub use store::{DeleteSummary, ensure_container, empty_container};
pub use traits::{
    ContainerInfo, ContainerMetadata, ObjectInfo, ObjectMetadata, ObjectStore, UploadSource,
    is_success,
};
