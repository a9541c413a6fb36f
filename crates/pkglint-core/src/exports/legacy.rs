//! Packages without `exports`: the `main` field and every shipped file.
//!
//! Without an export map, Node.js resolves the bare package name through
//! `main` (defaulting to `index.js`, with extension and `index` probing) and
//! lets importers reach any file in the package by path.

use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

use super::codes;
use super::context::{PathContext, ResolutionContext};
use super::existence::{normalize_target, FileProbe};
use super::{finish, Resolution};
use crate::diagnostics::{PathKey, SourceMap};
use crate::error::Result;

/// Manifest key of the legacy entry point.
pub const MAIN_KEY: &str = "main";

const DEFAULT_MAIN: &str = "index.js";
const EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

/// Inputs for the legacy fallback.
pub struct LegacyInput<'a> {
    /// Value of the `main` field, if present.
    pub main: Option<&'a Value>,
    pub package_root: &'a Path,
    pub shipped: &'a BTreeSet<String>,
    pub probe: &'a dyn FileProbe,
    pub source: &'a SourceMap,
}

/// Files Node.js tries for `main`, in order.
#[must_use]
pub fn main_candidates(main: &str) -> Vec<String> {
    let base = normalize_target(main).unwrap_or_default();
    let mut candidates = Vec::new();
    if !base.is_empty() {
        candidates.push(base.clone());
        for ext in EXTENSIONS {
            candidates.push(format!("{base}{ext}"));
        }
    }
    for ext in EXTENSIONS {
        if base.is_empty() {
            candidates.push(format!("index{ext}"));
        } else {
            candidates.push(format!("{base}/index{ext}"));
        }
    }
    candidates
}

/// Resolve `main`, then expose every shipped file by path.
///
/// # Errors
/// Only when a finding cannot be anchored in `source`.
pub fn resolve_main(input: &LegacyInput<'_>) -> Result<Resolution> {
    let mut ctx = ResolutionContext::new(input.package_root, input.shipped);

    let (main, json_path) = match input.main {
        Some(Value::String(main)) => (main.as_str(), vec![PathKey::from(MAIN_KEY)]),
        Some(_) => (DEFAULT_MAIN, vec![PathKey::from(MAIN_KEY)]),
        None => (DEFAULT_MAIN, Vec::new()),
    };
    let main_path = PathContext {
        json_path,
        path_order: vec![0],
        conditions: None,
        specifier: Some(".".to_string()),
    };

    // Node.js ignores a non-string `main` and falls back to `index.js`
    let invalid_main = input.main.is_some_and(|main| !main.is_string());
    if invalid_main {
        ctx.report(
            codes::MAIN_PATH_NOT_FOUND,
            format!("`main` must be a string; Node.js ignores it and looks for `{DEFAULT_MAIN}`"),
            main_path.json_path.clone(),
        );
    }

    let found = main_candidates(main)
        .into_iter()
        .find(|candidate| input.probe.is_file(candidate));
    match found {
        Some(file) => {
            let raw_path = format!("./{file}");
            ctx.push_entry(".".to_string(), &raw_path, &main_path, false, Some(true));
            if !input.shipped.contains(&file) {
                ctx.report(
                    codes::MAIN_NPM_IGNORED,
                    format!("`{file}` is not included in the published package; check `files` and `.npmignore`"),
                    main_path.json_path.clone(),
                );
            }
        }
        None if invalid_main => {}
        None => ctx.report(
            codes::MAIN_PATH_NOT_FOUND,
            format!("Cannot resolve the package entry point `{main}`"),
            main_path.json_path.clone(),
        ),
    }

    for (index, file) in input.shipped.iter().enumerate() {
        let path = PathContext {
            json_path: Vec::new(),
            path_order: vec![index + 1],
            conditions: None,
            specifier: None,
        };
        let raw_path = format!("./{file}");
        ctx.push_entry(raw_path.clone(), &raw_path, &path, false, Some(true));
    }
    for entry in &mut ctx.entries {
        entry.is_shipped = normalize_target(&entry.raw_path)
            .is_some_and(|rel| input.shipped.contains(&rel));
    }

    finish(ctx, input.source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn run(manifest: &Value, shipped: &[&str], on_disk: &[&str]) -> Resolution {
        let text = serde_json::to_string_pretty(manifest).unwrap();
        let source = SourceMap::parse(&text).unwrap();
        let shipped = set(shipped);
        let on_disk = set(on_disk);
        resolve_main(&LegacyInput {
            main: manifest.get(MAIN_KEY),
            package_root: Path::new("/pkg"),
            shipped: &shipped,
            probe: &on_disk,
            source: &source,
        })
        .unwrap()
    }

    #[test]
    fn test_main_candidates() {
        assert_eq!(
            main_candidates("./lib/main"),
            vec![
                "lib/main",
                "lib/main.js",
                "lib/main.json",
                "lib/main.node",
                "lib/main/index.js",
                "lib/main/index.json",
                "lib/main/index.node",
            ]
        );
        assert_eq!(
            main_candidates("./"),
            vec!["index.js", "index.json", "index.node"]
        );
    }

    #[test]
    fn test_main_resolves_with_extension() {
        let r = run(
            &json!({"name": "x", "main": "lib/main"}),
            &["lib/main.js", "package.json"],
            &["lib/main.js", "package.json"],
        );
        let specs: Vec<_> = r.entries.iter().map(|e| e.specifier.as_str()).collect();
        assert_eq!(specs, vec![".", "./lib/main.js", "./package.json"]);
        assert_eq!(r.entries[0].resolved_location, Path::new("/pkg/lib/main.js"));
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn test_default_main_missing() {
        let r = run(&json!({"name": "x"}), &["package.json"], &["package.json"]);
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics[0].code, codes::MAIN_PATH_NOT_FOUND);
        // Anchored at the whole document when `main` is absent
        assert_eq!(r.diagnostics[0].span.start.offset, 0);
    }

    #[test]
    fn test_main_not_shipped() {
        let r = run(
            &json!({"name": "x", "main": "./dist/index.js"}),
            &["package.json"],
            &["dist/index.js", "package.json"],
        );
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics[0].code, codes::MAIN_NPM_IGNORED);
        assert_eq!(r.diagnostics[0].path, "main");
    }

    #[test]
    fn test_non_string_main_falls_back_to_index() {
        let r = run(
            &json!({"name": "x", "main": 5}),
            &["index.js", "package.json"],
            &["index.js", "package.json"],
        );
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics[0].code, codes::MAIN_PATH_NOT_FOUND);
        assert_eq!(r.diagnostics[0].path, "main");
        assert_eq!(r.entries[0].specifier, ".");
        assert_eq!(r.entries[0].resolved_location, Path::new("/pkg/index.js"));
    }

    #[test]
    fn test_non_string_main_reported_once() {
        let r = run(
            &json!({"name": "x", "main": ["./a.js"]}),
            &["package.json"],
            &["package.json"],
        );
        assert_eq!(r.diagnostics.len(), 1);
        assert_eq!(r.diagnostics[0].path, "main");
        assert!(r.diagnostics[0].message.contains("must be a string"));
    }
}
