//! Source/build folder layout for one lifecycle run.

use std::path::{Path, PathBuf};

/// Relative source root within the working tree.
pub const SOURCE_ROOT: &str = ".";

/// Relative build output directory within the working tree.
pub const BUILD_ROOT: &str = "builddir";

/// Folder layout resolved once per orchestration run.
///
/// Owned by the orchestrator for the duration of one run; pure path
/// construction with no failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderLayout {
    /// Source root, relative to the working tree.
    pub source_root: PathBuf,

    /// Build output directory, relative to the working tree.
    pub build_root: PathBuf,
}

impl FolderLayout {
    /// Resolve the fixed layout.
    pub fn resolve() -> Self {
        FolderLayout {
            source_root: PathBuf::from(SOURCE_ROOT),
            build_root: PathBuf::from(BUILD_ROOT),
        }
    }

    /// Absolute source directory under a working tree root.
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.source_root)
    }

    /// Absolute build directory under a working tree root.
    pub fn build_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.build_root)
    }
}

impl Default for FolderLayout {
    fn default() -> Self {
        Self::resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fixed_paths() {
        let layout = FolderLayout::resolve();
        assert_eq!(layout.source_root, Path::new("."));
        assert_eq!(layout.build_root, Path::new("builddir"));
    }

    #[test]
    fn test_dirs_under_root() {
        let layout = FolderLayout::resolve();
        let root = Path::new("/work");
        assert_eq!(layout.build_dir(root), Path::new("/work/builddir"));
        assert_eq!(layout.source_dir(root), Path::new("/work/."));
    }
}
