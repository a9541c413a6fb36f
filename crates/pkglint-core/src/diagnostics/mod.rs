//! Diagnostics anchored to positions in `package.json`.
//!
//! Checks record a [`Finding`] against a JSON path while they run. Once a
//! pass is complete the findings are anchored through a [`SourceMap`] into
//! [`Diagnostic`]s carrying line/column spans, then sorted by position.
//!
//! # Sort Order
//!
//! Diagnostics are sorted by start offset, then end offset. Ties keep the
//! order in which the findings were recorded.

pub mod source;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

pub use source::{LineIndex, SourceMap};

use crate::error::Result;

/// A single key in a JSON path: an object property or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathKey {
    Key(String),
    Index(usize),
}

impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Render a JSON path the way it reads in JavaScript: `exports["./a"][0]`.
#[must_use]
pub fn format_json_path(path: &[PathKey]) -> String {
    let mut out = String::new();
    for (i, key) in path.iter().enumerate() {
        match key {
            PathKey::Key(k) if i == 0 => out.push_str(k),
            // Debug formatting quotes and escapes the key
            PathKey::Key(k) => {
                let _ = write!(out, "[{k:?}]");
            }
            PathKey::Index(idx) => {
                let _ = write!(out, "[{idx}]");
            }
        }
    }
    out
}

/// Severity levels for diagnostics.
///
/// The checks only ever produce warnings; escalation to `Error` is a policy
/// decision left to the consumer (see [`Diagnostic::escalate`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unanchored problem recorded during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Stable rule identifier (see [`crate::exports::codes`]).
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Location of the offending node in the manifest.
    pub json_path: Vec<PathKey>,
}

impl Finding {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>, json_path: Vec<PathKey>) -> Self {
        Self {
            code,
            message: message.into(),
            json_path,
        }
    }
}

/// A 0-based line/column position, with the byte offset it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    #[serde(skip)]
    pub offset: usize,
}

/// Source span of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A finding anchored to the manifest source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable rule identifier.
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    /// JSON path of the node, formatted for display.
    pub path: String,
    pub span: Span,
}

impl Diagnostic {
    /// Raise this diagnostic to `Error` severity.
    #[must_use]
    pub fn escalate(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }
}

/// Anchor findings to source spans and sort them by position.
///
/// # Errors
/// Returns [`crate::Error::PathNotInSource`] if a finding points at a path
/// that does not exist in the source text.
pub fn anchor(findings: Vec<Finding>, source: &SourceMap) -> Result<Vec<Diagnostic>> {
    let mut diagnostics = findings
        .into_iter()
        .map(|finding| {
            let span = source.span_of(&finding.json_path)?;
            Ok(Diagnostic {
                code: finding.code,
                severity: Severity::Warning,
                message: finding.message,
                path: format_json_path(&finding.json_path),
                span,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    diagnostics.sort_by_key(|d| (d.span.start.offset, d.span.end.offset));
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json_path() {
        let path = vec![
            PathKey::from("exports"),
            PathKey::from("./other"),
            PathKey::from(0),
        ];
        assert_eq!(format_json_path(&path), r#"exports["./other"][0]"#);
        assert_eq!(format_json_path(&[]), "");
    }

    #[test]
    fn test_anchor_sorts_by_position() {
        let text = r#"{"exports": {"./b": "./b.js", "./a": "./a.js"}}"#;
        let source = SourceMap::parse(text).unwrap();
        let findings = vec![
            Finding::new(
                "second",
                "later in the file",
                vec!["exports".into(), "./a".into()],
            ),
            Finding::new(
                "first",
                "earlier in the file",
                vec!["exports".into(), "./b".into()],
            ),
        ];

        let diagnostics = anchor(findings, &source).unwrap();
        assert_eq!(diagnostics[0].code, "first");
        assert_eq!(diagnostics[1].code, "second");
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].path, r#"exports["./b"]"#);
    }

    #[test]
    fn test_anchor_unknown_path_is_error() {
        let source = SourceMap::parse(r#"{"exports": "./a.js"}"#).unwrap();
        let findings = vec![Finding::new("x", "y", vec!["main".into()])];
        assert!(matches!(
            anchor(findings, &source),
            Err(crate::Error::PathNotInSource { .. })
        ));
    }

    #[test]
    fn test_escalate() {
        let source = SourceMap::parse("{}").unwrap();
        let diagnostics = anchor(vec![Finding::new("x", "y", vec![])], &source).unwrap();
        let escalated = diagnostics[0].clone().escalate();
        assert_eq!(escalated.severity, Severity::Error);
    }
}
