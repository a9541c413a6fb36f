//! Package.json `exports` resolution and validation.
//!
//! Walks the export map the way Node.js reads it and flattens it into
//! concrete `(specifier, conditions, file)` entries, checked against the
//! files that will actually ship:
//! - Root exports (`"exports": "./index.js"`, root conditions)
//! - Subpath exports (`"./feature": ...`)
//! - Pattern exports with a single `*`, expanded against shipped files
//! - Conditional exports, nested to any depth
//! - `null` targets that exclude previously exported subpaths
//!
//! Problems are never errors: they are collected as findings and returned
//! as position-sorted [`Diagnostic`]s next to the entries.
//!
//! # Passes
//!
//! 1. Walk (shape, specifiers, conditions, leaves, wildcards)
//! 2. Negations
//! 3. Existence and packaging (probes run in parallel, joined before reporting)
//! 4. Main-entry check
//! 5. Ordering and anchoring

pub mod codes;
pub mod conditions;
pub mod context;
pub mod existence;
pub mod legacy;
pub mod negation;
pub mod order;
pub mod shape;
pub mod walk;
pub mod wildcard;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

pub use context::{CandidateEntry, ExportEntry, NegationRecord, PathContext, ResolutionContext};
pub use existence::{FileProbe, FsProbe};

use crate::diagnostics::{anchor, Diagnostic, PathKey, SourceMap};
use crate::error::Result;

/// Manifest key holding the export map.
pub const EXPORTS_KEY: &str = "exports";

/// Inputs for one resolution.
pub struct ResolveInput<'a> {
    /// Value of the `exports` field.
    pub exports: &'a Value,
    /// Directory containing `package.json`.
    pub package_root: &'a Path,
    /// Files that will ship, relative to the root, `/`-separated.
    pub shipped: &'a BTreeSet<String>,
    /// Existence predicate over the package root.
    pub probe: &'a dyn FileProbe,
    /// Position tree over the manifest text the value was parsed from.
    pub source: &'a SourceMap,
}

/// Ordered entries and position-sorted diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub entries: Vec<ExportEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve and validate an export map.
///
/// # Errors
/// Only on a broken collaborator contract, e.g. a finding whose JSON path
/// has no node in `source`.
pub fn resolve_exports(input: &ResolveInput<'_>) -> Result<Resolution> {
    let mut ctx = ResolutionContext::new(input.package_root, input.shipped);
    let root = PathContext::root(vec![PathKey::from(EXPORTS_KEY)]);

    walk::walk(&mut ctx, input.exports, &root)?;
    negation::apply_negations(&mut ctx);
    existence::check_existence(&mut ctx, input.probe);
    check_main_export(&mut ctx, &root);

    finish(ctx, input.source)
}

/// Report an export map that leaves the package root unimportable.
fn check_main_export(ctx: &mut ResolutionContext<'_>, root: &PathContext) {
    let has_main = ctx.entries.iter().any(|e| e.specifier == ".")
        || ctx.negations.iter().any(|n| n.specifier == ".");
    if !has_main {
        ctx.report(
            codes::EXPORTS_MAIN_MISSING,
            "No `.` export: the package cannot be imported by its bare name",
            root.json_path.clone(),
        );
    }
}

/// Sort entries, anchor findings and drop the walk-only fields.
pub(crate) fn finish(mut ctx: ResolutionContext<'_>, source: &SourceMap) -> Result<Resolution> {
    order::sort_entries(&mut ctx.entries);
    let diagnostics = anchor(ctx.findings, source)?;
    Ok(Resolution {
        entries: ctx.entries.into_iter().map(ExportEntry::from).collect(),
        diagnostics,
    })
}
