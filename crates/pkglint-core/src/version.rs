use serde::Serialize;
use std::fmt::Write;

use crate::check::PACKAGE_REPORT_SCHEMA_VERSION;
use crate::exports::codes;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git hash baked in by release builds.
const BUILD_GIT_HASH: Option<&str> = option_env!("PKGLINT_BUILD_GIT_HASH");

/// Version details for `pkglint version --json`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_hash: Option<&'static str>,
    /// Schema version of the `check --json` report.
    pub report_schema_version: u32,
    /// Every rule id the checker can report.
    pub rules: &'static [&'static str],
}

impl VersionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: BUILD_GIT_HASH,
            report_schema_version: PACKAGE_REPORT_SCHEMA_VERSION,
            rules: codes::ALL,
        }
    }
}

/// `pkglint <version>`, with the git hash when the build carries one.
#[must_use]
pub fn version_string() -> String {
    let mut s = format!("pkglint {VERSION}");
    if let Some(hash) = BUILD_GIT_HASH {
        let _ = write!(s, " ({hash})");
    }
    s
}
