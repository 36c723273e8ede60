//! Test-source lister.
//!
//! Enumerates candidate test-source files for the downstream test harness:
//! every regular file directly inside the fixed `cases` directory whose name
//! ends in `.c` or `.cpp`, prefixed with the directory name. Directory
//! listing order is not portable, so results are sorted lexicographically.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fixed directory holding test-source files.
pub const CASES_DIR: &str = "cases";

/// Recognized test-source suffixes.
pub const SOURCE_SUFFIXES: &[&str] = &[".c", ".cpp"];

/// Error from test-source listing.
#[derive(Debug, Error)]
pub enum ListError {
    /// The `cases` directory does not exist. An empty directory is a valid
    /// empty result, never this error.
    #[error("test case directory not found: {dir}")]
    DirectoryNotFound { dir: PathBuf },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// List test-source paths under `<root>/cases`, sorted.
///
/// Paths are returned as `cases/<filename>`. Subdirectories are not
/// descended into.
pub fn list_test_sources(root: &Path) -> Result<Vec<String>, ListError> {
    let dir = root.join(CASES_DIR);
    if !dir.is_dir() {
        return Err(ListError::DirectoryNotFound { dir });
    }

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if SOURCE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            sources.push(format!("{}/{}", CASES_DIR, name));
        }
    }

    sources.sort();
    Ok(sources)
}
