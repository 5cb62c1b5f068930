//! swc-swift: OpenStack Swift adapter for swc
//!
//! This crate authenticates against tempauth or KeyStone and implements the
//! ObjectStore trait over Swift's HTTP API. It is the only crate that
//! talks HTTP.

pub mod auth;
pub mod client;
pub mod container;
pub mod mimetype;
pub mod object;
pub mod session;

pub use auth::{AuthOptions, AuthVersion, authenticate};
pub use client::SwiftClient;
pub use container::ContainerScope;
pub use object::ObjectScope;
pub use session::{DEFAULT_TIMEOUT, Session};
