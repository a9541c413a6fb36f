#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod check;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exports;
pub mod paths;
pub mod pkg;
pub mod version;

pub use check::{
    check_package, CheckOptions, PackageReport, ReportSummary, PACKAGE_REPORT_SCHEMA_VERSION,
};
pub use config::Config;
pub use diagnostics::{Diagnostic, PathKey, Position, Severity, Span};
pub use error::{Error, Result};
pub use exports::{resolve_exports, ExportEntry, FileProbe, FsProbe, Resolution, ResolveInput};
pub use pkg::Manifest;
pub use version::VERSION;
