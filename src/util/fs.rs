//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Check whether a directory exists and contains at least one entry.
pub fn is_non_empty_dir(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}

/// Find files matching a glob pattern directly under a base directory.
///
/// Results are sorted and deduplicated so callers see a deterministic order
/// regardless of filesystem iteration order.
pub fn glob_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let mut results = Vec::new();
    for entry in
        glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
    {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Copy every file matching `pattern` under `src` into `dst`, overwriting
/// existing files. Returns the destination paths in sorted order.
///
/// Copies are whole-file overwrites; an interrupted run leaves no partially
/// merged file behind.
pub fn copy_glob(src: &Path, pattern: &str, dst: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(dst)?;

    let mut copied = Vec::new();
    for file in glob_files(src, pattern)? {
        let name = file
            .file_name()
            .with_context(|| format!("file has no name: {}", file.display()))?;
        let target = dst.join(name);
        fs::copy(&file, &target).with_context(|| {
            format!("failed to copy {} to {}", file.display(), target.display())
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Recursively collect files under `base` whose extension matches one of
/// `extensions`, sorted for determinism.
pub fn collect_files_with_extensions(base: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    collect_into(base, extensions, &mut out);
    out.sort();
    out
}

fn collect_into(dir: &Path, extensions: &[&str], out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, extensions, out);
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if extensions.contains(&ext) {
                out.push(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.h"), "").unwrap();
        fs::write(tmp.path().join("a.h"), "").unwrap();
        fs::write(tmp.path().join("c.c"), "").unwrap();

        let files = glob_files(tmp.path(), "*.h").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.h"));
        assert!(files[1].ends_with("b.h"));
    }

    #[test]
    fn test_copy_glob_overwrites() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();

        fs::write(src.join("api.h"), "new").unwrap();
        fs::write(dst.join("api.h"), "stale").unwrap();

        let copied = copy_glob(&src, "*.h", &dst).unwrap();
        assert_eq!(copied.len(), 1);
        assert_eq!(fs::read_to_string(dst.join("api.h")).unwrap(), "new");
    }

    #[test]
    fn test_is_non_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_non_empty_dir(tmp.path()));
        assert!(!is_non_empty_dir(&tmp.path().join("missing")));

        fs::write(tmp.path().join("file"), "x").unwrap();
        assert!(is_non_empty_dir(tmp.path()));
    }

    #[test]
    fn test_collect_files_with_extensions() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(tmp.path().join("top.a"), "").unwrap();
        fs::write(sub.join("nested.so"), "").unwrap();
        fs::write(sub.join("skip.txt"), "").unwrap();

        let files = collect_files_with_extensions(tmp.path(), &["a", "so"]);
        assert_eq!(files.len(), 2);
    }
}
