//! Output formatter for human-readable and JSON output
//!
//! Results go to stdout; errors and warnings go to stderr so that `swc cat`
//! and JSON consumers only ever see payload on stdout.

use serde::Serialize;

use super::OutputConfig;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Width of the label column in [`Formatter::field`] lines
const LABEL_WIDTH: usize = 10;

/// Formatter shared by all commands
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a formatter for the resolved output configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Output configuration this formatter was built from
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// JSON mode
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Quiet mode
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// ANSI colors are used only in human mode without `--no-color`
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    fn mark(&self, color: &str, symbol: char) -> String {
        if self.colors_enabled() {
            format!("{color}{symbol}{RESET}")
        } else {
            symbol.to_string()
        }
    }

    /// Success message; JSON consumers read the exit code instead
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        println!("{} {message}", self.mark(GREEN, '✓'));
    }

    /// Error message on stderr, printed even in quiet mode
    ///
    /// In JSON mode the message is wrapped as `{"error": "..."}`.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            eprintln!("{error:#}");
        } else {
            eprintln!("{} {message}", self.mark(RED, '✗'));
        }
    }

    /// Warning on stderr (human mode only)
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        eprintln!("{} {message}", self.mark(YELLOW, '⚠'));
    }

    /// Serialize a value as pretty JSON on stdout
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }

    /// Print an aligned `label : value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        self.println(&format_field(label, value));
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

fn format_field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{label:<LABEL_WIDTH$}: {value}")
}
