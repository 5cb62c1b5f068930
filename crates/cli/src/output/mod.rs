//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats. It also handles the transfer spinner and colored output.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::ProgressBar;

use swc_core::config::Defaults;

/// Output configuration derived from CLI flags and config defaults
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Combine command-line flags with the `[defaults]` table
    ///
    /// A flag can only switch a behavior on; the config file decides the rest.
    pub fn resolve(
        json: bool,
        no_color: bool,
        no_progress: bool,
        quiet: bool,
        defaults: &Defaults,
    ) -> Self {
        Self {
            json: json || defaults.output.eq_ignore_ascii_case("json"),
            no_color: no_color || defaults.color.eq_ignore_ascii_case("never"),
            no_progress: no_progress || !defaults.progress,
            quiet,
        }
    }
}
