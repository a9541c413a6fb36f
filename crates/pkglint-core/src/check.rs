//! Whole-package check for `pkglint check`.
//!
//! Loads the manifest, computes what will ship, resolves `exports` (or the
//! legacy `main` fallback) and packages the result as a stable report.

use serde::Serialize;
use std::path::PathBuf;

use crate::diagnostics::{Diagnostic, Severity, SourceMap};
use crate::error::{Error, Result};
use crate::exports::legacy::{resolve_main, LegacyInput};
use crate::exports::{resolve_exports, ExportEntry, FsProbe, Resolution, ResolveInput};
use crate::pkg::{shipped_files, Manifest};

/// Schema version for `PackageReport`. Bump when changing the format.
pub const PACKAGE_REPORT_SCHEMA_VERSION: u32 = 1;

/// Options for checking one package.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Directory containing `package.json`.
    pub root: PathBuf,
    /// Resolve `main` and expose every shipped file when there is no
    /// `exports` field.
    pub legacy_fallback: bool,
}

impl CheckOptions {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            legacy_fallback: true,
        }
    }

    #[must_use]
    pub fn with_legacy_fallback(mut self, enabled: bool) -> Self {
        self.legacy_fallback = enabled;
        self
    }
}

/// Counts for the report footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub entries: usize,
    pub shipped_files: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// Result of checking a package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    /// Schema version for this structure.
    pub schema_version: u32,
    /// Canonical package root.
    pub root: String,
    /// Package name, if the manifest has one.
    pub name: Option<String>,
    /// Whether entries came from `exports` rather than the legacy fallback.
    pub has_exports: bool,
    pub entries: Vec<ExportEntry>,
    /// Sorted by position in `package.json`.
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ReportSummary,
}

impl PackageReport {
    /// Raise every warning to an error.
    pub fn escalate_warnings(&mut self) {
        self.diagnostics = std::mem::take(&mut self.diagnostics)
            .into_iter()
            .map(Diagnostic::escalate)
            .collect();
        self.summary = summarize(&self.entries, &self.diagnostics, self.summary.shipped_files);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Check the package at `options.root`.
///
/// # Errors
/// Returns an error if the root or its manifest cannot be read, or if the
/// package directory cannot be walked.
pub fn check_package(options: &CheckOptions) -> Result<PackageReport> {
    let root = dunce::canonicalize(&options.root).map_err(|_| Error::ManifestNotFound {
        root: options.root.clone(),
    })?;
    let manifest = Manifest::load(&root)?;
    let shipped = shipped_files(&root, &manifest)?;
    let source = SourceMap::parse(manifest.text())?;
    let probe = FsProbe::new(&root);

    let resolution = match manifest.exports() {
        Some(exports) => resolve_exports(&ResolveInput {
            exports,
            package_root: &root,
            shipped: &shipped,
            probe: &probe,
            source: &source,
        })?,
        None if options.legacy_fallback => resolve_main(&LegacyInput {
            main: manifest.main(),
            package_root: &root,
            shipped: &shipped,
            probe: &probe,
            source: &source,
        })?,
        None => Resolution {
            entries: Vec::new(),
            diagnostics: Vec::new(),
        },
    };

    let summary = summarize(&resolution.entries, &resolution.diagnostics, shipped.len());
    Ok(PackageReport {
        schema_version: PACKAGE_REPORT_SCHEMA_VERSION,
        root: root.to_string_lossy().into_owned(),
        name: manifest.name().map(str::to_string),
        has_exports: manifest.exports().is_some(),
        entries: resolution.entries,
        diagnostics: resolution.diagnostics,
        summary,
    })
}

fn summarize(entries: &[ExportEntry], diagnostics: &[Diagnostic], shipped_files: usize) -> ReportSummary {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    ReportSummary {
        entries: entries.len(),
        shipped_files,
        warnings: diagnostics.len() - errors,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::codes;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_package(root: &Path, manifest: &str, files: &[&str]) {
        fs::write(root.join("package.json"), manifest).unwrap();
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "export {};\n").unwrap();
        }
    }

    #[test]
    fn test_clean_package() {
        let dir = tempdir().unwrap();
        write_package(
            dir.path(),
            r#"{
  "name": "clean",
  "exports": {
    ".": {
      "import": "./dist/index.mjs",
      "require": "./dist/index.cjs"
    },
    "./utils": "./dist/utils.mjs"
  }
}"#,
            &["dist/index.mjs", "dist/index.cjs", "dist/utils.mjs"],
        );

        let report = check_package(&CheckOptions::new(dir.path().to_path_buf())).unwrap();
        assert_eq!(report.schema_version, PACKAGE_REPORT_SCHEMA_VERSION);
        assert_eq!(report.name.as_deref(), Some("clean"));
        assert!(report.has_exports);
        assert!(report.is_clean(), "{:?}", report.diagnostics);
        assert_eq!(report.summary.entries, 3);
        assert_eq!(report.summary.shipped_files, 4);
        assert!(report.entries.iter().all(|e| e.exists_on_disk));
    }

    #[test]
    fn test_missing_file_is_positioned() {
        let dir = tempdir().unwrap();
        write_package(
            dir.path(),
            "{\n  \"name\": \"broken\",\n  \"exports\": \"./missing.js\"\n}\n",
            &[],
        );

        let report = check_package(&CheckOptions::new(dir.path().to_path_buf())).unwrap();
        let codes: Vec<_> = report.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![codes::EXPORTS_PATH_NOT_FOUND, codes::EXPORTS_NPM_IGNORED]
        );
        let span = report.diagnostics[0].span;
        assert_eq!((span.start.line, span.start.column), (2, 13));
        assert_eq!(report.summary.warnings, 2);
    }

    #[test]
    fn test_legacy_fallback() {
        let dir = tempdir().unwrap();
        write_package(dir.path(), r#"{"name": "old", "main": "lib"}"#, &["lib/index.js"]);

        let report = check_package(&CheckOptions::new(dir.path().to_path_buf())).unwrap();
        assert!(!report.has_exports);
        let specs: Vec<_> = report.entries.iter().map(|e| e.specifier.as_str()).collect();
        assert_eq!(specs, vec![".", "./lib/index.js", "./package.json"]);
        assert!(report.is_clean());

        let report = check_package(
            &CheckOptions::new(dir.path().to_path_buf()).with_legacy_fallback(false),
        )
        .unwrap();
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_escalate_warnings() {
        let dir = tempdir().unwrap();
        write_package(dir.path(), r#"{"exports": {"default": "./a.js"}}"#, &["a.js"]);

        let mut report = check_package(&CheckOptions::new(dir.path().to_path_buf())).unwrap();
        assert_eq!(report.summary.warnings, 1);
        report.escalate_warnings();
        assert_eq!(report.summary.warnings, 0);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = check_package(&CheckOptions::new(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }
}
