//! Conditions objects: `{ "import": ..., "require": ..., "default": ... }`.

use serde_json::{Map, Value};

use super::codes;
use super::context::{PathContext, ResolutionContext};
use super::walk::walk;
use crate::error::{Error, Result};

/// A set of conditions that can never all apply at once.
#[derive(Debug, Clone, Copy)]
pub struct ExclusiveGroup {
    pub members: &'static [&'static str],
    /// When every member is present, one of them always matches, so a
    /// `default` fallback is unnecessary.
    pub exhaustive: bool,
}

/// Known mutually exclusive conditions, checked in this order.
pub const EXCLUSIVE_GROUPS: &[ExclusiveGroup] = &[
    ExclusiveGroup {
        members: &["import", "require"],
        exhaustive: true,
    },
    ExclusiveGroup {
        members: &["development", "production"],
        exhaustive: true,
    },
    ExclusiveGroup {
        members: &[
            "node",
            "browser",
            "deno",
            "bun",
            "react-native",
            "electron",
            "worker",
        ],
        exhaustive: false,
    },
];

const DEFAULT: &str = "default";
const TYPES: &str = "types";

/// Walk a conditions object, reporting redundant or contradictory keys.
///
/// Every key is walked, including ones flagged as unreachable: each branch
/// may still name files that ship.
pub fn resolve_conditions(
    ctx: &mut ResolutionContext<'_>,
    map: &Map<String, Value>,
    path: &PathContext,
) -> Result<()> {
    let last_key = map.keys().last().ok_or(Error::EmptySequence {
        what: "conditions object",
    })?;

    if map.len() == 1 && map.contains_key(DEFAULT) {
        ctx.report(
            codes::EXPORTS_CONDITIONS_VERBOSE,
            "A conditions object with only `default` is equivalent to its value; use the value directly",
            path.json_path.clone(),
        );
    }

    if let (Some(Value::String(default)), Some(Value::String(types))) =
        (map.get(DEFAULT), map.get(TYPES))
    {
        if expected_types_path(default).as_deref() == Some(types.as_str()) {
            ctx.report(
                codes::EXPORTS_TYPES_VERBOSE,
                format!(
                    "The `types` condition is redundant: TypeScript already finds `{types}` next to `{default}`"
                ),
                path.child_path(TYPES),
            );
        }
    }

    for (order, (key, value)) in map.iter().enumerate() {
        if let Some(active) = conflicting_condition(key, path.active_conditions()) {
            let message = if active == key {
                format!(
                    "Condition `{key}` is already active in an enclosing conditions object; nesting it again has no effect"
                )
            } else {
                format!(
                    "Condition `{key}` can never match here: it is mutually exclusive with the enclosing `{active}` condition"
                )
            };
            ctx.report(
                codes::EXPORTS_CONDITIONS_MUTUALLY_EXCLUSIVE,
                message,
                path.child_path(key),
            );
        }
        walk(ctx, value, &path.condition(key, order))?;
    }

    if map.contains_key(DEFAULT) {
        if last_key != DEFAULT {
            ctx.report(
                codes::EXPORTS_CONDITIONS_DEFAULT_MISPLACED,
                format!(
                    "`default` should be the last condition; `{last_key}` after it is never reached"
                ),
                path.child_path(last_key),
            );
        }
    } else if !covers_exhaustive_group(map) {
        ctx.report(
            codes::EXPORTS_CONDITIONS_DEFAULT_MISSING,
            "Conditions object has no `default` fallback; environments matching none of the conditions cannot resolve it",
            path.json_path.clone(),
        );
    }

    Ok(())
}

/// The first active condition sharing an exclusive group with `key`, if any.
///
/// `key` itself counts: a condition nested under itself is reported too.
fn conflicting_condition<'a>(key: &str, active: &'a [String]) -> Option<&'a str> {
    for group in EXCLUSIVE_GROUPS.iter().filter(|g| g.members.contains(&key)) {
        let conflict = active
            .iter()
            .find(|c| group.members.contains(&c.as_str()));
        if let Some(conflict) = conflict {
            return Some(conflict);
        }
    }
    None
}

fn covers_exhaustive_group(map: &Map<String, Value>) -> bool {
    EXCLUSIVE_GROUPS
        .iter()
        .filter(|g| g.exhaustive)
        .any(|g| g.members.iter().all(|m| map.contains_key(*m)))
}

/// Declaration file TypeScript would look up next to `path`.
///
/// `./index.js` -> `./index.d.ts`, `.cjs` -> `.d.cts`, `.mjs` -> `.d.mts`.
#[must_use]
pub fn expected_types_path(path: &str) -> Option<String> {
    [(".js", ".d.ts"), (".cjs", ".d.cts"), (".mjs", ".d.mts")]
        .iter()
        .find_map(|(ext, dts)| path.strip_suffix(ext).map(|stem| format!("{stem}{dts}")))
}
