//! External build-tool abstraction.
//!
//! The orchestrator never invokes Meson or git directly; it depends on the
//! `BuildTools` trait so tests can substitute a fake. The real implementation
//! is [`meson::MesonTools`].

pub mod git;
pub mod meson;

use std::path::{Path, PathBuf};

use anyhow::Result;
use semver::Version;
use url::Url;

pub use meson::MesonTools;

/// Paths handed to each tool invocation.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Source directory (working tree root).
    pub source_dir: PathBuf,

    /// Build output directory.
    pub build_dir: PathBuf,

    /// Toolchain machine file produced by the generate step, if any.
    pub machine_file: Option<PathBuf>,

    /// Parallel job count for the build step.
    pub jobs: Option<usize>,

    /// Verbose tool output.
    pub verbose: bool,
}

impl StepContext {
    /// Create a context for the given source and build directories.
    pub fn new(source_dir: PathBuf, build_dir: PathBuf) -> Self {
        StepContext {
            source_dir,
            build_dir,
            machine_file: None,
            jobs: None,
            verbose: false,
        }
    }

    /// Set the toolchain machine file.
    pub fn with_machine_file(mut self, machine_file: PathBuf) -> Self {
        self.machine_file = Some(machine_file);
        self
    }

    /// Set the parallel job count.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Interface to the external build tool and version-control fetch.
///
/// Each method blocks until the underlying invocation completes. Errors
/// carry the tool's raw diagnostic; the orchestrator wraps them with the
/// lifecycle step name and propagates them unmodified.
pub trait BuildTools {
    /// Configure the build tree (e.g. `meson setup`).
    fn configure(&self, ctx: &StepContext) -> Result<()>;

    /// Compile every target (e.g. `meson compile`).
    fn build_all(&self, ctx: &StepContext) -> Result<()>;

    /// Install built artifacts under `destdir` (e.g. `meson install`).
    fn install(&self, ctx: &StepContext, destdir: &Path) -> Result<()>;

    /// Fetch the source tree pinned to `v<version>` into `dest`.
    ///
    /// Implementations must perform exactly one fetch invocation: a shallow,
    /// tag-pinned clone. `dest` is guaranteed by the caller to not exist or
    /// to be an empty directory.
    fn fetch_tag(&self, url: &Url, version: &Version, dest: &Path) -> Result<()>;
}

/// Build tool availability status.
#[derive(Debug, Clone)]
pub enum ToolAvailability {
    /// Tool is installed and ready.
    Available {
        /// Detected version of the tool
        version: Version,
    },

    /// Tool is not installed.
    NotInstalled {
        /// Name of the missing tool (e.g., "meson")
        tool: String,
        /// Hint for how to install it
        install_hint: String,
    },
}

impl ToolAvailability {
    /// Check if the tool is available.
    pub fn is_available(&self) -> bool {
        matches!(self, ToolAvailability::Available { .. })
    }

    /// Get error message if not available.
    pub fn error_message(&self) -> Option<String> {
        match self {
            ToolAvailability::Available { .. } => None,
            ToolAvailability::NotInstalled { tool, install_hint } => {
                Some(format!("{} not found. {}", tool, install_hint))
            }
        }
    }
}
