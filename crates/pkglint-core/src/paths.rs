use std::path::{Path, PathBuf};

/// Name of the package manifest file.
pub const MANIFEST_FILE: &str = "package.json";

/// Find the package root by walking up from `cwd` looking for `package.json`.
///
/// Returns the first directory containing a manifest, or `None` if none is found.
#[must_use]
pub fn package_root(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(MANIFEST_FILE).is_file() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}
