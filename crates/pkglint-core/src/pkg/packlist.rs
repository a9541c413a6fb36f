//! Files that `npm pack` would include.
//!
//! An approximation of npm's packing rules, close enough to tell whether an
//! exported file ships:
//! - `node_modules/` and `.git/` are never walked
//! - with a `files` array, only matching files ship (`!pattern` excludes)
//! - `package.json`, root `README*`/`LICENSE*`/`LICENCE*` and `main` always ship
//! - lockfiles, ignore files, `.DS_Store` and `*.orig` never ship

use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::Path;

use super::manifest::Manifest;
use crate::error::Result;
use crate::exports::existence::normalize_target;
use crate::paths::MANIFEST_FILE;
use pkglint_util::fs::walk_files;

const SKIP_DIRS: &[&str] = &["node_modules", ".git"];
const NEVER_SHIP: &[&str] = &[
    ".npmignore",
    ".gitignore",
    "package-lock.json",
    ".DS_Store",
];
const ALWAYS_SHIP_PREFIXES: &[&str] = &["README", "LICENSE", "LICENCE"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compute the shipped-file set for the package at `root`.
///
/// # Errors
/// Returns an error if the package directory cannot be walked.
pub fn shipped_files(root: &Path, manifest: &Manifest) -> Result<BTreeSet<String>> {
    let filter = manifest.files().map(|entries| FilesFilter::new(&entries));
    let main = manifest
        .main()
        .and_then(|m| m.as_str())
        .and_then(normalize_target);

    let shipped = walk_files(root, SKIP_DIRS)?
        .into_iter()
        .filter(|file| {
            if never_ships(file) {
                return false;
            }
            always_ships(file)
                || main.as_deref() == Some(file.as_str())
                || filter.as_ref().map_or(true, |f| f.includes(file))
        })
        .collect();
    Ok(shipped)
}

fn basename(file: &str) -> &str {
    file.rsplit('/').next().unwrap_or(file)
}

fn never_ships(file: &str) -> bool {
    let name = basename(file);
    NEVER_SHIP.contains(&name) || name.ends_with(".orig")
}

fn always_ships(file: &str) -> bool {
    if file == MANIFEST_FILE {
        return true;
    }
    if file.contains('/') {
        return false;
    }
    let upper = file.to_ascii_uppercase();
    ALWAYS_SHIP_PREFIXES.iter().any(|p| upper.starts_with(p))
}

#[derive(Debug)]
enum Rule {
    /// A file, or every file below a directory.
    Path(String),
    Glob(Pattern),
}

impl Rule {
    fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim_start_matches("./").trim_end_matches('/');
        if entry.is_empty() {
            return None;
        }
        if entry.contains(['*', '?', '[']) {
            // Invalid globs match nothing, as with npm
            Pattern::new(entry).ok().map(Self::Glob)
        } else {
            Some(Self::Path(entry.to_string()))
        }
    }

    fn matches(&self, file: &str) -> bool {
        match self {
            Self::Path(path) => {
                file == path
                    || file
                        .strip_prefix(path.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            // A glob naming a directory includes everything below it
            Self::Glob(pattern) => ancestors(file).any(|p| pattern.matches_with(p, MATCH_OPTIONS)),
        }
    }
}

/// `a/b/c.js`, then `a/b`, then `a`.
fn ancestors(file: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(file), |p| p.rfind('/').map(|i| &p[..i]))
}

/// The `files` field, compiled.
#[derive(Debug)]
struct FilesFilter {
    include: Vec<Rule>,
    exclude: Vec<Rule>,
}

impl FilesFilter {
    fn new(entries: &[&str]) -> Self {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for entry in entries {
            match entry.strip_prefix('!') {
                Some(negated) => exclude.extend(Rule::parse(negated)),
                None => include.extend(Rule::parse(entry)),
            }
        }
        Self { include, exclude }
    }

    fn includes(&self, file: &str) -> bool {
        self.include.iter().any(|r| r.matches(file)) && !self.exclude.iter().any(|r| r.matches(file))
    }
}
