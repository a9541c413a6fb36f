//! Apply `null` exports after the walk.

use std::collections::BTreeSet;

use super::codes;
use super::context::{CandidateEntry, NegationRecord, ResolutionContext};
use super::wildcard::Pattern;

/// Remove every entry matched by a negation.
///
/// An entry matches when its specifier fits the negation's specifier (a
/// `*` matches any text) and both carry the same set of conditions, in any
/// order. Negations that remove nothing are reported.
pub fn apply_negations(ctx: &mut ResolutionContext<'_>) {
    let negations = std::mem::take(&mut ctx.negations);
    for negation in &negations {
        let before = ctx.entries.len();
        ctx.entries.retain(|entry| !negates(negation, entry));
        if ctx.entries.len() == before {
            ctx.report(
                codes::EXPORTS_NEGATED_MISSING,
                format!(
                    "`null` for `{}` does not exclude anything exported elsewhere",
                    negation.specifier
                ),
                negation.json_path.clone(),
            );
        }
    }
    ctx.negations = negations;
}

fn negates(negation: &NegationRecord, entry: &CandidateEntry) -> bool {
    let specifier_matches = match Pattern::split(&negation.specifier) {
        Some(pattern) => pattern.matches(&entry.specifier),
        None => negation.specifier == entry.specifier,
    };
    specifier_matches && same_conditions(negation.conditions.as_deref(), entry.conditions.as_deref())
}

fn same_conditions(a: Option<&[String]>, b: Option<&[String]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::context::PathContext;
    use std::path::Path;

    fn ctx_with(shipped: &BTreeSet<String>) -> ResolutionContext<'_> {
        ResolutionContext::new(Path::new("/pkg"), shipped)
    }

    #[test]
    fn test_exact_negation_removes_entry() {
        let shipped = BTreeSet::new();
        let mut ctx = ctx_with(&shipped);
        let root = PathContext::root(vec!["exports".into()]);
        ctx.push_entry("./a".into(), "./a.js", &root.specifier("./a", 0), false, None);
        ctx.push_entry("./b".into(), "./b.js", &root.specifier("./b", 1), false, None);
        ctx.push_negation("./a".into(), &root.specifier("./a", 2));

        apply_negations(&mut ctx);
        assert_eq!(ctx.entries.len(), 1);
        assert_eq!(ctx.entries[0].specifier, "./b");
        assert!(ctx.findings.is_empty());
    }

    #[test]
    fn test_wildcard_negation() {
        let shipped = BTreeSet::new();
        let mut ctx = ctx_with(&shipped);
        let root = PathContext::root(vec!["exports".into()]);
        let spec = root.specifier("./*", 0);
        ctx.push_entry("./a".into(), "./lib/a.js", &spec, true, Some(true));
        ctx.push_entry("./internal/x".into(), "./lib/internal/x.js", &spec, true, Some(true));
        ctx.push_negation("./internal/*".into(), &root.specifier("./internal/*", 1));

        apply_negations(&mut ctx);
        let specs: Vec<_> = ctx.entries.iter().map(|e| e.specifier.as_str()).collect();
        assert_eq!(specs, vec!["./a"]);
    }

    #[test]
    fn test_conditions_compared_as_sets() {
        let shipped = BTreeSet::new();
        let mut ctx = ctx_with(&shipped);
        let root = PathContext::root(vec!["exports".into()]);
        let entry_path = root.condition("node", 0).condition("import", 0);
        let negation_path = root.condition("import", 1).condition("node", 0);
        ctx.push_entry(".".into(), "./a.mjs", &entry_path, false, None);
        ctx.push_negation(".".into(), &negation_path);

        apply_negations(&mut ctx);
        assert!(ctx.entries.is_empty());
    }

    #[test]
    fn test_negation_does_not_cross_condition_branches() {
        let shipped = BTreeSet::new();
        let mut ctx = ctx_with(&shipped);
        let root = PathContext::root(vec!["exports".into()]);
        ctx.push_entry(".".into(), "./a.mjs", &root.condition("import", 0), false, None);
        ctx.push_negation(".".into(), &root.condition("require", 1));

        apply_negations(&mut ctx);
        assert_eq!(ctx.entries.len(), 1);
        assert_eq!(ctx.findings.len(), 1);
        assert_eq!(ctx.findings[0].code, codes::EXPORTS_NEGATED_MISSING);
    }

    #[test]
    fn test_unconditional_vs_conditional() {
        assert!(same_conditions(None, None));
        assert!(!same_conditions(None, Some(&["node".to_string()])));
    }
}
