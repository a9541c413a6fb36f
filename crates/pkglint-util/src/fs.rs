use std::fs;
use std::io;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render a relative path as a `/`-separated string.
///
/// `.` components are dropped so `./lib/a.js` and `lib/a.js` normalize
/// to the same text. Returns `None` for paths that escape upward (`..`)
/// or are absolute.
#[must_use]
pub fn to_slash_rel(path: &Path) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}

/// Walk `root` and collect every regular file as a `/`-separated path
/// relative to `root`.
///
/// Directories whose name is listed in `skip_dirs` are not descended into.
/// Symlinks are not followed. The result is sorted.
///
/// # Errors
/// Returns an error if `root` cannot be read.
pub fn walk_files(root: &Path, skip_dirs: &[&str]) -> io::Result<Vec<String>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter();
    let walker = walker.filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .map_or(true, |name| !skip_dirs.contains(&name))
    });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let msg = e.to_string();
            e.into_io_error().unwrap_or_else(|| io::Error::other(msg))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if let Some(rel) = to_slash_rel(rel) {
            files.push(rel);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_read_to_string_lossy_valid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_read_to_string_lossy_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        // Write invalid UTF-8: valid start, then invalid continuation
        file.write_all(&[0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x80, 0x81])
            .unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert!(content.starts_with("Hello"));
        assert!(content.contains('\u{FFFD}')); // replacement character
    }

    #[test]
    fn test_to_slash_rel() {
        assert_eq!(
            to_slash_rel(&PathBuf::from("./lib/a.js")),
            Some("lib/a.js".to_string())
        );
        assert_eq!(
            to_slash_rel(&PathBuf::from("lib").join("nested").join("b.js")),
            Some("lib/nested/b.js".to_string())
        );
        assert_eq!(to_slash_rel(&PathBuf::from("../escape.js")), None);
    }

    #[test]
    fn test_walk_files_skips_dirs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lib/deep")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("lib/a.js"), "").unwrap();
        fs::write(dir.path().join("lib/deep/b.js"), "").unwrap();
        fs::write(dir.path().join("node_modules/dep/index.js"), "").unwrap();

        let files = walk_files(dir.path(), &["node_modules"]).unwrap();
        assert_eq!(files, vec!["lib/a.js", "lib/deep/b.js", "package.json"]);
    }
}
