use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::check::CheckOptions;

/// Run configuration for pkglint, built from CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory the package root is searched from.
    pub cwd: PathBuf,

    /// JSON report on stdout and JSON log lines on stderr.
    pub json: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Treat every diagnostic as an error.
    pub deny_warnings: bool,

    /// Check `main` and shipped files when there is no `exports` field.
    pub legacy_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json: false,
            verbosity: 0,
            deny_warnings: false,
            legacy_fallback: true,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn with_deny_warnings(mut self, deny: bool) -> Self {
        self.deny_warnings = deny;
        self
    }

    #[must_use]
    pub fn with_legacy_fallback(mut self, enabled: bool) -> Self {
        self.legacy_fallback = enabled;
        self
    }

    /// Log level name for the verbosity, as understood by `RUST_LOG`.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Check options for the package at `root`.
    #[must_use]
    pub fn check_options(&self, root: PathBuf) -> CheckOptions {
        CheckOptions::new(root).with_legacy_fallback(self.legacy_fallback)
    }
}
