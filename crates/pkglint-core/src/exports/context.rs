//! State threaded through one export-map resolution.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::diagnostics::{Finding, PathKey};

/// Where the walker currently is in the export map.
///
/// Cloned on every descent, so sibling branches never see each other's
/// choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathContext {
    /// Location of the current node in the manifest.
    pub json_path: Vec<PathKey>,
    /// Declaration index chosen at each level; decides output order.
    pub path_order: Vec<usize>,
    /// Conditions chosen by enclosing condition objects. `None` means no
    /// condition level has been entered yet.
    pub conditions: Option<Vec<String>>,
    /// Specifier chosen at the nearest specifier level.
    pub specifier: Option<String>,
}

impl PathContext {
    /// Context for the export-map value found at `json_path`.
    #[must_use]
    pub fn root(json_path: Vec<PathKey>) -> Self {
        Self {
            json_path,
            ..Self::default()
        }
    }

    /// Descend into an array item.
    #[must_use]
    pub fn item(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.json_path.push(PathKey::Index(index));
        next.path_order.push(index);
        next
    }

    /// Descend into the value of a specifier key.
    #[must_use]
    pub fn specifier(&self, key: &str, order: usize) -> Self {
        let mut next = self.clone();
        next.json_path.push(PathKey::from(key));
        next.path_order.push(order);
        next.specifier = Some(key.to_string());
        next
    }

    /// Descend into the value of a condition key.
    #[must_use]
    pub fn condition(&self, key: &str, order: usize) -> Self {
        let mut next = self.clone();
        next.json_path.push(PathKey::from(key));
        next.path_order.push(order);
        next.conditions
            .get_or_insert_with(Vec::new)
            .push(key.to_string());
        next
    }

    /// JSON path of a direct child key, without descending.
    #[must_use]
    pub fn child_path(&self, key: &str) -> Vec<PathKey> {
        let mut path = self.json_path.clone();
        path.push(PathKey::from(key));
        path
    }

    /// Conditions currently in force, empty when none.
    #[must_use]
    pub fn active_conditions(&self) -> &[String] {
        self.conditions.as_deref().unwrap_or(&[])
    }
}

/// A concrete `(specifier, conditions, file)` produced by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Fully substituted specifier.
    pub specifier: String,
    pub conditions: Option<Vec<String>>,
    /// Target path as declared, `./`-prefixed.
    pub raw_path: String,
    /// `raw_path` joined onto the package root.
    pub resolved_location: PathBuf,
    pub json_path: Vec<PathKey>,
    pub path_order: Vec<usize>,
    pub wildcard_expanded: bool,
    /// `None` until the existence pass has probed the file.
    pub exists_on_disk: Option<bool>,
    pub is_shipped: bool,
}

/// A `null` leaf: anything matching this signature must not be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegationRecord {
    /// May contain a single `*`.
    pub specifier: String,
    pub conditions: Option<Vec<String>>,
    pub json_path: Vec<PathKey>,
    pub path_order: Vec<usize>,
}

/// Accumulator owned by a single resolution.
pub struct ResolutionContext<'a> {
    pub entries: Vec<CandidateEntry>,
    pub negations: Vec<NegationRecord>,
    pub findings: Vec<Finding>,
    pub shipped: &'a BTreeSet<String>,
    pub package_root: &'a Path,
}

impl<'a> ResolutionContext<'a> {
    #[must_use]
    pub fn new(package_root: &'a Path, shipped: &'a BTreeSet<String>) -> Self {
        Self {
            entries: Vec::new(),
            negations: Vec::new(),
            findings: Vec::new(),
            shipped,
            package_root,
        }
    }

    /// Record a finding.
    pub fn report(&mut self, code: &'static str, message: impl Into<String>, json_path: Vec<PathKey>) {
        self.findings.push(Finding::new(code, message, json_path));
    }

    /// Append a candidate entry for `raw_path` under `path`.
    ///
    /// `exists` is `Some(true)` when the caller already knows the file is
    /// present (it came from the shipped set), `None` to probe later.
    pub fn push_entry(
        &mut self,
        specifier: String,
        raw_path: &str,
        path: &PathContext,
        wildcard_expanded: bool,
        exists: Option<bool>,
    ) {
        let resolved_location = self.package_root.join(raw_path.trim_start_matches("./"));
        self.entries.push(CandidateEntry {
            specifier,
            conditions: path.conditions.clone(),
            raw_path: raw_path.to_string(),
            resolved_location,
            json_path: path.json_path.clone(),
            path_order: path.path_order.clone(),
            wildcard_expanded,
            exists_on_disk: exists,
            is_shipped: false,
        });
    }

    /// Append a negation for `specifier` under `path`.
    pub fn push_negation(&mut self, specifier: String, path: &PathContext) {
        self.negations.push(NegationRecord {
            specifier,
            conditions: path.conditions.clone(),
            json_path: path.json_path.clone(),
            path_order: path.path_order.clone(),
        });
    }
}

/// An export entry as exposed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub specifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    pub exists_on_disk: bool,
    pub resolved_location: PathBuf,
    pub json_path: Vec<PathKey>,
}

impl From<CandidateEntry> for ExportEntry {
    fn from(entry: CandidateEntry) -> Self {
        Self {
            specifier: entry.specifier,
            conditions: entry.conditions,
            exists_on_disk: entry.exists_on_disk.unwrap_or(false),
            resolved_location: entry.resolved_location,
            json_path: entry.json_path,
        }
    }
}
