//! Meson build tools - wraps meson setup/compile/install invocations.

use std::path::Path;

use anyhow::{bail, Context, Result};
use semver::Version;
use url::Url;

use crate::backend::{git, BuildTools, StepContext, ToolAvailability};
use crate::util::process::{find_executable, ProcessBuilder};

/// Real `BuildTools` implementation shelling out to Meson and fetching
/// sources with git.
#[derive(Debug, Default)]
pub struct MesonTools;

impl MesonTools {
    /// Create a new Meson tools instance.
    pub fn new() -> Self {
        MesonTools
    }

    /// Check that meson is installed, with a version when detectable.
    pub fn availability() -> ToolAvailability {
        match detect_meson_version() {
            Ok(version) => ToolAvailability::Available { version },
            Err(_) => ToolAvailability::NotInstalled {
                tool: "meson".to_string(),
                install_hint: meson_install_hint(),
            },
        }
    }

    /// Check that ninja (the Meson backend) is installed.
    pub fn ninja_available() -> bool {
        find_executable("ninja").is_some()
    }

    fn configure_args(ctx: &StepContext) -> Vec<String> {
        let mut args = vec![
            "setup".to_string(),
            ctx.build_dir.display().to_string(),
            ctx.source_dir.display().to_string(),
            // Install with a bare prefix; package() relocates via --destdir.
            "--prefix=/".to_string(),
        ];

        if let Some(ref machine_file) = ctx.machine_file {
            args.push(format!("--native-file={}", machine_file.display()));
        }

        // A previously configured build dir is reused, not an error.
        if ctx.build_dir.join("meson-private").exists() {
            args.push("--reconfigure".to_string());
        }

        args
    }
}

impl BuildTools for MesonTools {
    fn configure(&self, ctx: &StepContext) -> Result<()> {
        let args = Self::configure_args(ctx);
        let pb = ProcessBuilder::new("meson").args(&args);

        tracing::debug!("Meson configure: {}", pb.display_command());
        pb.exec_and_check()?;
        Ok(())
    }

    fn build_all(&self, ctx: &StepContext) -> Result<()> {
        let mut args = vec![
            "compile".to_string(),
            "-C".to_string(),
            ctx.build_dir.display().to_string(),
        ];

        if let Some(jobs) = ctx.jobs {
            args.push("-j".to_string());
            args.push(jobs.to_string());
        }

        if ctx.verbose {
            args.push("-v".to_string());
        }

        let pb = ProcessBuilder::new("meson").args(&args);
        tracing::debug!("Meson build: {}", pb.display_command());
        pb.exec_and_check()?;
        Ok(())
    }

    fn install(&self, ctx: &StepContext, destdir: &Path) -> Result<()> {
        let args = vec![
            "install".to_string(),
            "-C".to_string(),
            ctx.build_dir.display().to_string(),
            "--destdir".to_string(),
            destdir.display().to_string(),
        ];

        let pb = ProcessBuilder::new("meson").args(&args);
        tracing::debug!("Meson install: {}", pb.display_command());
        pb.exec_and_check()?;
        Ok(())
    }

    fn fetch_tag(&self, url: &Url, version: &Version, dest: &Path) -> Result<()> {
        git::clone_tag(url, version, dest)
    }
}

/// Detect the installed Meson version.
fn detect_meson_version() -> Result<Version> {
    let output = ProcessBuilder::new("meson")
        .arg("--version")
        .exec()
        .context("failed to run meson --version")?;

    if !output.status.success() {
        bail!("meson --version failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Meson outputs just the version number, e.g., "1.3.0" or "1.3.0.dev1"
    let version_str = stdout.trim();
    let clean_version = version_str
        .split(|c: char| !c.is_ascii_digit() && c != '.')
        .next()
        .unwrap_or(version_str);

    let parts: Vec<&str> = clean_version.split('.').collect();
    let major = parts.first().and_then(|s| s.parse().ok()).unwrap_or(0);
    let minor = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
    let patch = parts.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);

    Ok(Version::new(major, minor, patch))
}

/// Platform-specific Meson install hint.
fn meson_install_hint() -> String {
    #[cfg(target_os = "linux")]
    {
        "Install Meson: pip install meson, apt install meson, or https://mesonbuild.com/Getting-meson.html".to_string()
    }
    #[cfg(target_os = "macos")]
    {
        "Install Meson: brew install meson, pip install meson, or https://mesonbuild.com/Getting-meson.html".to_string()
    }
    #[cfg(target_os = "windows")]
    {
        "Install Meson: pip install meson, winget install meson, or https://mesonbuild.com/Getting-meson.html".to_string()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        "Install Meson from https://mesonbuild.com/Getting-meson.html".to_string()
    }
}
