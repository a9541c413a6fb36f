//! Reading `package.json`.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths::MANIFEST_FILE;
use pkglint_util::fs::read_to_string_lossy;

/// A parsed `package.json` together with its source text.
///
/// Object keys keep declaration order (`serde_json` is built with
/// `preserve_order`), which the export-map walk depends on.
#[derive(Debug, Clone)]
pub struct Manifest {
    text: String,
    value: Value,
}

impl Manifest {
    /// Load `package.json` from `root`.
    ///
    /// # Errors
    /// Returns [`Error::ManifestNotFound`] if there is no manifest, and
    /// [`Error::ManifestRead`]/[`Error::ManifestParse`] if it cannot be read
    /// or is not valid JSON.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                root: root.to_path_buf(),
            });
        }
        let text = read_to_string_lossy(&path).map_err(|source| Error::ManifestRead {
            path: path.clone(),
            source,
        })?;
        Self::from_text(path, text)
    }

    /// Parse manifest text read from `path`.
    ///
    /// # Errors
    /// Returns [`Error::ManifestParse`] if `text` is not valid JSON.
    fn from_text(path: PathBuf, text: String) -> Result<Self> {
        let value = serde_json::from_str(&text)
            .map_err(|source| Error::ManifestParse { path, source })?;
        Ok(Self { text, value })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(Value::as_str)
    }

    /// The `exports` field, if present (any JSON type).
    #[must_use]
    pub fn exports(&self) -> Option<&Value> {
        self.value.get("exports")
    }

    /// The raw `main` field, if present.
    #[must_use]
    pub fn main(&self) -> Option<&Value> {
        self.value.get("main")
    }

    /// String entries of the `files` array. `None` when the field is absent
    /// or not an array, which means "ship everything".
    #[must_use]
    pub fn files(&self) -> Option<Vec<&str>> {
        let files = self.value.get("files")?.as_array()?;
        Some(files.iter().filter_map(Value::as_str).collect())
    }
}
