use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes for machine-readable output.
pub mod codes {
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const MANIFEST_NOT_FOUND: &str = "MANIFEST_NOT_FOUND";
    pub const MANIFEST_READ_FAILED: &str = "MANIFEST_READ_FAILED";
    pub const MANIFEST_INVALID: &str = "MANIFEST_INVALID";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Core error type for pkglint operations.
///
/// Problems in the export map itself are never errors; they are reported as
/// diagnostics. An `Error` means the check could not run at all, or that a
/// collaborator broke its contract (e.g. a JSON path with no source node).
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("package.json not found in {root}")]
    ManifestNotFound { root: PathBuf },

    #[error("Failed to read manifest at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON path {path} does not resolve to a node in the manifest source")]
    PathNotInSource { path: String },

    #[error("Malformed JSON source at byte {offset}")]
    SourceScan { offset: usize },

    #[error("Expected a non-empty {what}")]
    EmptySequence { what: &'static str },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the stable error code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => codes::IO_ERROR,
            Self::ManifestNotFound { .. } => codes::MANIFEST_NOT_FOUND,
            Self::ManifestRead { .. } => codes::MANIFEST_READ_FAILED,
            Self::ManifestParse { .. } => codes::MANIFEST_INVALID,
            // Contract breaks between passes, not user-facing problems
            Self::PathNotInSource { .. }
            | Self::SourceScan { .. }
            | Self::EmptySequence { .. }
            | Self::Other(_) => codes::INTERNAL,
        }
    }

    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result alias for pkglint operations.
pub type Result<T> = std::result::Result<T, Error>;
