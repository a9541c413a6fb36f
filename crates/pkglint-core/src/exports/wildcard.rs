//! Single-`*` patterns and their expansion against the shipped files.
//!
//! A `*` in an export pattern stands for any text, `/` included. Expanding
//! `"./features/*": "./dist/*.js"` means finding every shipped file that fits
//! `dist/*.js`, recovering what `*` stood for in each, and substituting it
//! into the specifier.

use std::collections::BTreeSet;

/// A pattern split around its first `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
}

impl<'a> Pattern<'a> {
    /// Split `text` around its first `*`. `None` when it has no `*`.
    #[must_use]
    pub fn split(text: &'a str) -> Option<Self> {
        let (prefix, suffix) = text.split_once('*')?;
        Some(Self { prefix, suffix })
    }

    /// True when the suffix holds another `*`.
    #[must_use]
    pub fn has_extra_wildcard(&self) -> bool {
        self.suffix.contains('*')
    }

    /// Does `text` fit this pattern with a non-empty substitution?
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        text.len() > self.prefix.len() + self.suffix.len()
            && text.starts_with(self.prefix)
            && text.ends_with(self.suffix)
    }

    /// Replace `*` with `value`.
    #[must_use]
    pub fn substitute(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + value.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(value);
        out.push_str(self.suffix);
        out
    }

    /// Recover the text `*` stood for in `matched`.
    ///
    /// Scans occurrences of the suffix after the prefix, left to right, and
    /// takes the first whose substitution reproduces `matched` exactly.
    /// Falls back to everything after the prefix.
    ///
    /// Only an occurrence ending exactly at the end of `matched` can pass the
    /// round-trip check, so earlier occurrences never win; the scan settles
    /// on the trailing one.
    #[must_use]
    pub fn recover<'m>(&self, matched: &'m str) -> &'m str {
        let start = self.prefix.len().min(matched.len());
        let Some(rest) = matched.get(start..) else {
            return "";
        };
        if self.suffix.is_empty() {
            return rest;
        }

        let mut from = 0;
        while let Some(found) = rest[from..].find(self.suffix) {
            let at = from + found;
            let candidate = &rest[..at];
            if self.substitute(candidate) == matched {
                return candidate;
            }
            // Step one char so overlapping occurrences are visited too
            from = at + rest[at..].chars().next().map_or(1, char::len_utf8);
        }
        rest
    }
}

/// One file reached through a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Specifier with `*` substituted.
    pub specifier: String,
    /// `./`-prefixed path of the matched file.
    pub raw_path: String,
}

/// Expand a `specifier`/`target` pattern pair against `shipped`.
///
/// `target` is the `./`-prefixed value pattern; `shipped` holds paths
/// relative to the package root without the `./`. Results follow the order
/// of `shipped` and carry one entry per distinct substitution.
#[must_use]
pub fn expand(specifier: Pattern<'_>, target: Pattern<'_>, shipped: &BTreeSet<String>) -> Vec<Expansion> {
    let file_pattern = Pattern {
        prefix: target.prefix.trim_start_matches("./"),
        suffix: target.suffix,
    };

    let mut seen = BTreeSet::new();
    let mut expansions = Vec::new();
    for file in shipped {
        if !file_pattern.matches(file) {
            continue;
        }
        let substitution = file_pattern.recover(file);
        if !seen.insert(substitution.to_string()) {
            continue;
        }
        expansions.push(Expansion {
            specifier: specifier.substitute(substitution),
            raw_path: format!("./{file}"),
        });
    }
    expansions
}
