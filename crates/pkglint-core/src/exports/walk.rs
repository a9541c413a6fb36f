//! Recursive walk over the export map.

use serde_json::{Map, Value};

use super::codes;
use super::conditions::resolve_conditions;
use super::context::{PathContext, ResolutionContext};
use super::shape::{Rejection, Shape};
use super::wildcard::{self, Pattern};
use crate::error::Result;

/// Walk `value` at `path`, accumulating entries, negations and findings.
pub fn walk(ctx: &mut ResolutionContext<'_>, value: &Value, path: &PathContext) -> Result<()> {
    match Shape::classify(value, path) {
        Shape::Alternatives(items) => {
            ctx.report(
                codes::EXPORTS_ALTERNATIVES,
                "Fallback arrays are not followed by Node.js: only the first item is ever used",
                path.json_path.clone(),
            );
            walk(ctx, &items[0], &path.item(0))
        }
        Shape::Specifiers(map) => resolve_specifiers(ctx, map, path),
        Shape::Conditions(map) => resolve_conditions(ctx, map, path),
        Shape::Leaf(target) => {
            resolve_leaf(ctx, target, path);
            Ok(())
        }
        Shape::Rejected(rejection) => {
            report_rejection(ctx, &rejection, path);
            Ok(())
        }
    }
}

fn report_rejection(ctx: &mut ResolutionContext<'_>, rejection: &Rejection, path: &PathContext) {
    let (code, message) = match rejection {
        Rejection::EmptyAlternatives => (
            codes::EXPORTS_ALTERNATIVES_EMPTY,
            "Empty array resolves nothing".to_string(),
        ),
        Rejection::EmptyObject => (
            codes::EXPORTS_OBJECT_EMPTY,
            "Empty object resolves nothing".to_string(),
        ),
        Rejection::MixedObject => (
            codes::EXPORTS_OBJECT_MIXED,
            "Object mixes specifier keys (starting with `.`) and condition keys; Node.js rejects it"
                .to_string(),
        ),
        Rejection::NestedSpecifiers(keys) => {
            let listed = keys
                .iter()
                .map(|k| format!("`{k}`"))
                .collect::<Vec<_>>()
                .join(", ");
            let message = if keys.len() == 1 {
                format!("Specifier {listed} cannot be nested inside another specifier")
            } else {
                format!("Specifiers {listed} cannot be nested inside another specifier")
            };
            (codes::EXPORTS_SPECIFIER_NESTED, message)
        }
        Rejection::InvalidValue => {
            let expected = if path.specifier.is_some() {
                "a string path, null, an array or a conditions object"
            } else {
                "a string path, null, an array, a conditions object or a specifiers object"
            };
            (
                codes::EXPORTS_VALUE_INVALID,
                format!("Expected {expected}"),
            )
        }
    };
    ctx.report(code, message, path.json_path.clone());
}

fn resolve_specifiers(
    ctx: &mut ResolutionContext<'_>,
    map: &Map<String, Value>,
    path: &PathContext,
) -> Result<()> {
    for (order, (key, value)) in map.iter().enumerate() {
        if let Some((stem, ext)) = split_extension(key) {
            let message = if map.contains_key(stem) {
                format!(
                    "`{key}` duplicates `{stem}` with a `.{ext}` extension; consider removing `{key}`"
                )
            } else {
                format!("Consider exporting `{stem}` instead of `{key}`; specifiers do not need a `.{ext}` extension")
            };
            ctx.report(
                codes::EXPORTS_SPECIFIER_EXTENSION,
                message,
                path.child_path(key),
            );
        }
        walk(ctx, value, &path.specifier(key, order))?;
    }
    Ok(())
}

/// Split a trailing `.ext` off a specifier. The extension must be
/// non-empty and contain no `/`.
fn split_extension(specifier: &str) -> Option<(&str, &str)> {
    let dot = specifier.rfind('.')?;
    let ext = &specifier[dot + 1..];
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some((&specifier[..dot], ext))
}

fn resolve_leaf(ctx: &mut ResolutionContext<'_>, target: Option<&str>, path: &PathContext) {
    if let Some(target) = target {
        if !target.starts_with("./") {
            ctx.report(
                codes::EXPORTS_PATH_UNPREFIXED,
                format!("Export targets must start with `./`; use `./{}`", target.trim_start_matches('/')),
                path.json_path.clone(),
            );
            return;
        }
    }

    let specifier = path.specifier.as_deref().unwrap_or(".");

    let Some(target) = target else {
        ctx.push_negation(specifier.to_string(), path);
        return;
    };
    let Some(spec_pattern) = Pattern::split(specifier) else {
        ctx.push_entry(specifier.to_string(), target, path, false, None);
        return;
    };

    if spec_pattern.has_extra_wildcard() {
        ctx.report(
            codes::EXPORTS_SPECIFIER_WILDCARD_INVALID,
            format!("Specifier `{specifier}` has more than one `*`; only one is allowed"),
            path.json_path.clone(),
        );
        return;
    }

    let Some(target_pattern) = Pattern::split(target) else {
        ctx.report(
            codes::EXPORTS_SPECIFIER_WILDCARD_USELESS,
            format!("Specifier `{specifier}` has a `*` but `{target}` does not; every subpath maps to the same file"),
            path.json_path.clone(),
        );
        ctx.push_entry(specifier.to_string(), target, path, false, None);
        return;
    };

    let expansions = wildcard::expand(spec_pattern, target_pattern, ctx.shipped);
    if expansions.is_empty() {
        ctx.report(
            codes::EXPORTS_PATH_WILDCARD_NOT_FOUND,
            format!("No shipped file matches `{target}`"),
            path.json_path.clone(),
        );
        return;
    }
    for expansion in expansions {
        ctx.push_entry(expansion.specifier, &expansion.raw_path, path, true, Some(true));
    }
}
