//! Process exit codes for `swc`
//!
//! Scripts branch on these numbers, so existing values never change.

use std::fmt;

use swc_core::Error;

/// Exit status of an `swc` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    /// Bad arguments or a malformed path
    UsageError = 2,
    /// Connection refused, timed out or reset; worth retrying
    NetworkError = 3,
    /// Rejected credentials or an expired token
    AuthError = 4,
    /// Unknown alias, container or object
    NotFound = 5,
    /// Container not empty, container already exists
    Conflict = 6,
    /// Cross-container or cross-alias copy and similar requests
    UnsupportedFeature = 7,
    /// Ctrl+C
    Interrupted = 130,
}

const ALL: [ExitCode; 9] = [
    ExitCode::Success,
    ExitCode::GeneralError,
    ExitCode::UsageError,
    ExitCode::NetworkError,
    ExitCode::AuthError,
    ExitCode::NotFound,
    ExitCode::Conflict,
    ExitCode::UnsupportedFeature,
    ExitCode::Interrupted,
];

impl ExitCode {
    /// Value handed to `std::process::exit`
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Reverse of [`ExitCode::as_i32`]
    pub fn from_i32(code: i32) -> Option<Self> {
        ALL.into_iter().find(|exit| exit.as_i32() == code)
    }

    /// Map the HTTP status of a create/delete/copy request
    ///
    /// Anything outside the handled ranges is a general failure.
    pub const fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            401 | 403 => Self::AuthError,
            404 => Self::NotFound,
            409 | 412 => Self::Conflict,
            _ => Self::GeneralError,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::GeneralError => "general error",
            Self::UsageError => "invalid usage",
            Self::NetworkError => "network error",
            Self::AuthError => "authentication failed",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::UnsupportedFeature => "not supported",
            Self::Interrupted => "interrupted",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
