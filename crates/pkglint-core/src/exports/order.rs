//! Deterministic ordering of resolved entries.

use std::cmp::Ordering;

use super::context::CandidateEntry;

/// Compare entries by declaration order.
///
/// `path_order` compares lexicographically, so an entry declared at a parent
/// level sorts before its later siblings' descendants. Ties (wildcard
/// expansions of the same leaf) break by specifier segment count, then
/// alphabetically.
#[must_use]
pub fn compare_entries(a: &CandidateEntry, b: &CandidateEntry) -> Ordering {
    a.path_order
        .cmp(&b.path_order)
        .then_with(|| segment_count(&a.specifier).cmp(&segment_count(&b.specifier)))
        .then_with(|| a.specifier.cmp(&b.specifier))
}

fn segment_count(specifier: &str) -> usize {
    specifier.split('/').count()
}

/// Sort entries in place by [`compare_entries`].
pub fn sort_entries(entries: &mut [CandidateEntry]) {
    entries.sort_by(compare_entries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::context::{PathContext, ResolutionContext};
    use std::collections::BTreeSet;
    use std::path::Path;

    #[test]
    fn test_sort_by_path_order_then_specifier() {
        let shipped = BTreeSet::new();
        let mut ctx = ResolutionContext::new(Path::new("/pkg"), &shipped);
        let root = PathContext::root(vec!["exports".into()]);
        let wildcard = root.specifier("./*", 1);
        ctx.push_entry("./z/deep".into(), "./lib/z/deep.js", &wildcard, true, Some(true));
        ctx.push_entry("./b".into(), "./lib/b.js", &wildcard, true, Some(true));
        ctx.push_entry("./a".into(), "./lib/a.js", &wildcard, true, Some(true));
        ctx.push_entry(".".into(), "./index.js", &root.specifier(".", 0), false, None);

        sort_entries(&mut ctx.entries);
        let specs: Vec<_> = ctx.entries.iter().map(|e| e.specifier.as_str()).collect();
        assert_eq!(specs, vec![".", "./a", "./b", "./z/deep"]);

        // Sorting sorted output changes nothing
        let before = ctx.entries.clone();
        sort_entries(&mut ctx.entries);
        assert_eq!(ctx.entries, before);
    }

    #[test]
    fn test_parent_prefix_sorts_first() {
        let shipped = BTreeSet::new();
        let mut ctx = ResolutionContext::new(Path::new("/pkg"), &shipped);
        let root = PathContext::root(vec!["exports".into()]);
        let nested = root.condition("node", 0).condition("import", 1);
        ctx.push_entry(".".into(), "./b.js", &nested, false, None);
        ctx.push_entry(".".into(), "./a.js", &root.condition("node", 0), false, None);

        sort_entries(&mut ctx.entries);
        assert_eq!(ctx.entries[0].raw_path, "./a.js");
    }
}
