//! Tag-pinned source fetch via git.
//!
//! The fetch policy is a single shallow (depth 1) fetch of the version tag.
//! The upstream recipe defined the acquisition step twice, once shallow and
//! once full; this implementation keeps only the shallow variant.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{FetchOptions, Repository, ResetType};
use semver::Version;
use url::Url;

/// Directory name a clone of `url` produces, mirroring `git clone` behavior.
pub fn clone_target(url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or("source");

    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// Reference name for a version tag.
pub fn tag_ref(version: &Version) -> String {
    format!("refs/tags/v{}", version)
}

/// Shallow-clone the tree at tag `v<version>` from `url` into `dest`.
///
/// Performs exactly one fetch: the tag ref at depth 1. The working tree is
/// then hard-reset to the tagged commit.
pub fn clone_tag(url: &Url, version: &Version, dest: &Path) -> Result<()> {
    let tag = format!("v{}", version);
    tracing::info!("Cloning {} at tag {}", url, tag);

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let repo = Repository::init(dest)
        .with_context(|| format!("failed to initialize repository at {}", dest.display()))?;

    let mut remote = repo
        .remote("origin", url.as_str())
        .context("failed to add origin remote")?;

    let mut opts = FetchOptions::new();
    opts.depth(1);

    let refspec = format!("{r}:{r}", r = tag_ref(version));
    remote
        .fetch(&[refspec.as_str()], Some(&mut opts), None)
        .with_context(|| format!("failed to fetch tag {} from {}", tag, url))?;

    let reference = repo
        .find_reference(&tag_ref(version))
        .with_context(|| format!("tag {} does not exist in {}", tag, url))?;
    let commit = reference
        .peel_to_commit()
        .with_context(|| format!("tag {} does not point at a commit", tag))?;

    repo.reset(commit.as_object(), ResetType::Hard, None)
        .with_context(|| format!("failed to check out tag {}", tag))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_target() {
        let url = Url::parse("https://github.com/fossillogic/fossil-jellyfish").unwrap();
        assert_eq!(clone_target(&url), "fossil-jellyfish");

        let with_git = Url::parse("https://github.com/user/repo.git").unwrap();
        assert_eq!(clone_target(&with_git), "repo");
    }

    #[test]
    fn test_tag_ref() {
        assert_eq!(tag_ref(&Version::new(0, 1, 4)), "refs/tags/v0.1.4");
    }

    #[test]
    fn test_clone_tag_unreachable_url_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let url = Url::parse("file:///nonexistent/repo").unwrap();
        let result = clone_tag(&url, &Version::new(0, 1, 4), &tmp.path().join("dest"));
        assert!(result.is_err());
    }
}
