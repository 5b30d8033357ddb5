//! Locating `.ae` source files on disk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostics::AeError;

/// File extension of ae source files.
pub const SOURCE_EXTENSION: &str = "ae";

pub fn is_ae_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION)
}

/// Collects the `.ae` files under `root`.
///
/// A file path is returned as-is whatever its extension. For a directory the
/// search is recursive and the result is sorted so runs are deterministic.
pub fn discover_source_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, AeError> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| AeError::Io {
            path: root.display().to_string(),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() || !is_ae_file(entry.path()) {
            continue;
        }
        files.push(entry.path().to_path_buf());
    }
    files.sort();
    Ok(files)
}
