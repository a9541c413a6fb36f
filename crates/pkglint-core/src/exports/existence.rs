//! File existence and packaging checks over resolved entries.

use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::codes;
use super::context::ResolutionContext;
use pkglint_util::fs::to_slash_rel;

/// Answers whether a file exists, relative to the package root.
///
/// Probes run in parallel, so implementations must be `Sync`.
pub trait FileProbe: Sync {
    /// `rel` is `/`-separated and has no `./` prefix.
    fn is_file(&self, rel: &str) -> bool;
}

/// Probe the real filesystem under `root`.
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl FileProbe for FsProbe {
    fn is_file(&self, rel: &str) -> bool {
        self.root.join(rel).is_file()
    }
}

impl FileProbe for BTreeSet<String> {
    fn is_file(&self, rel: &str) -> bool {
        self.contains(rel)
    }
}

/// Normalize a declared `./` path to the form used by probes and the
/// shipped set. `None` if it escapes the package root.
#[must_use]
pub fn normalize_target(raw_path: &str) -> Option<String> {
    to_slash_rel(Path::new(raw_path))
}

/// Probe every entry whose existence is still unknown, then report
/// missing files and files that will not ship.
///
/// All probes finish before any finding is recorded.
pub fn check_existence(ctx: &mut ResolutionContext<'_>, probe: &dyn FileProbe) {
    ctx.entries
        .par_iter_mut()
        .filter(|entry| entry.exists_on_disk.is_none())
        .for_each(|entry| {
            let exists = normalize_target(&entry.raw_path).is_some_and(|rel| probe.is_file(&rel));
            entry.exists_on_disk = Some(exists);
        });

    let shipped = ctx.shipped;
    let mut findings = Vec::new();
    for entry in &mut ctx.entries {
        if entry.exists_on_disk == Some(false) {
            findings.push((
                codes::EXPORTS_PATH_NOT_FOUND,
                format!("`{}` does not exist", entry.raw_path),
                entry.json_path.clone(),
            ));
        }
        entry.is_shipped = normalize_target(&entry.raw_path).is_some_and(|rel| shipped.contains(&rel));
        if !entry.is_shipped {
            findings.push((
                codes::EXPORTS_NPM_IGNORED,
                format!(
                    "`{}` is not included in the published package; check `files` and `.npmignore`",
                    entry.raw_path
                ),
                entry.json_path.clone(),
            ));
        }
    }
    for (code, message, path) in findings {
        ctx.report(code, message, path);
    }
}
