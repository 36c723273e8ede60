//! The lifecycle state machine for one package run.

use std::path::{Path, PathBuf};

use crate::backend::{git, BuildTools, StepContext};
use crate::core::descriptor::PackageDescriptor;
use crate::core::layout::FolderLayout;
use crate::core::metadata::ConsumerMetadata;
use crate::orchestrator::errors::{LifecycleError, LifecycleState};
use crate::orchestrator::toolchain::ToolchainConfig;
use crate::util::fs::{collect_files_with_extensions, copy_glob, ensure_dir, is_non_empty_dir};

/// Glob matching public headers under the descriptor's header subpath.
const HEADER_GLOB: &str = "*.h";

/// Library file extensions recognized when scanning the package output.
const LIBRARY_EXTENSIONS: &[&str] = &["a", "so", "dylib", "dll", "lib"];

/// Artifacts found in the package output after `package()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledArtifactSet {
    /// Header files under `<output_root>/include`, sorted.
    pub headers: Vec<PathBuf>,

    /// Compiled libraries under `<output_root>/lib*`, sorted.
    pub libraries: Vec<PathBuf>,
}

/// Sequences the package lifecycle for one run.
///
/// Steps must be invoked in order: layout, generate, source, build,
/// package, package_info. Re-running a completed step with identical
/// inputs is allowed; anything else fails with a sequence error. Running
/// two orchestrations against the same build directory concurrently is
/// unsupported and undefined.
pub struct Orchestrator<T: BuildTools> {
    descriptor: PackageDescriptor,
    tools: T,
    root: PathBuf,
    jobs: Option<usize>,
    verbose: bool,
    state: LifecycleState,
    layout: Option<FolderLayout>,
    toolchain: Option<ToolchainConfig>,
}

impl<T: BuildTools> Orchestrator<T> {
    /// Create an orchestrator for one run rooted at `root`.
    pub fn new(descriptor: PackageDescriptor, tools: T, root: impl Into<PathBuf>) -> Self {
        Orchestrator {
            descriptor,
            tools,
            root: root.into(),
            jobs: None,
            verbose: false,
            state: LifecycleState::Uninitialized,
            layout: None,
            toolchain: None,
        }
    }

    /// Set the parallel job count passed to the build tool.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set verbose tool output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The package descriptor this run builds.
    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    /// Working tree root for this run.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the source/build folder layout.
    ///
    /// Pure path construction with no failure modes; callable regardless of
    /// prior state and always yields the same fixed paths.
    pub fn resolve_layout(&mut self) -> &FolderLayout {
        let layout = FolderLayout::resolve();
        tracing::debug!(
            "Layout: source={} build={}",
            layout.source_root.display(),
            layout.build_root.display()
        );

        self.layout = Some(layout);
        if self.state == LifecycleState::Uninitialized {
            self.state = LifecycleState::LayoutResolved;
        }
        self.layout.as_ref().expect("layout just resolved")
    }

    /// Validate the settings combination and write the toolchain machine
    /// file under the build root.
    pub fn generate_toolchain(&mut self) -> Result<&ToolchainConfig, LifecycleError> {
        self.require(
            "generate",
            LifecycleState::LayoutResolved,
            LifecycleState::ToolchainGenerated,
        )?;

        self.descriptor.settings.validate().map_err(|reason| {
            LifecycleError::ToolchainGeneration {
                step: "generate",
                diagnostic: reason,
            }
        })?;

        let build_dir = self.layout().build_dir(&self.root);
        let config = ToolchainConfig::generate(&self.descriptor, &build_dir).map_err(|e| {
            LifecycleError::ToolchainGeneration {
                step: "generate",
                diagnostic: format!("{:#}", e),
            }
        })?;

        self.toolchain = Some(config);
        self.state = LifecycleState::ToolchainGenerated;
        Ok(self.toolchain.as_ref().expect("toolchain just generated"))
    }

    /// Fetch the tagged source into the working tree.
    ///
    /// Exactly one fetch invocation: a shallow, tag-pinned clone. Fails when
    /// the clone target already exists and is non-empty, except when the
    /// same run already completed this step (idempotent re-run).
    pub fn acquire_source(&mut self) -> Result<PathBuf, LifecycleError> {
        let rerun = self.require(
            "source",
            LifecycleState::ToolchainGenerated,
            LifecycleState::SourceAcquired,
        )?;

        let dest = self.root.join(git::clone_target(&self.descriptor.url));

        if is_non_empty_dir(&dest) {
            if rerun {
                // This run already fetched into dest; nothing to do.
                return Ok(dest);
            }
            return Err(self.source_error(format!(
                "clone target {} already exists and is not empty",
                dest.display()
            )));
        }

        self.tools
            .fetch_tag(&self.descriptor.url, &self.descriptor.version, &dest)
            .map_err(|e| self.source_error(format!("{:#}", e)))?;

        self.state = LifecycleState::SourceAcquired;
        Ok(dest)
    }

    /// Configure and build via the external build tool.
    pub fn build(&mut self) -> Result<(), LifecycleError> {
        self.require("build", LifecycleState::SourceAcquired, LifecycleState::Built)?;

        let ctx = self.step_context();

        self.tools.configure(&ctx).map_err(|e| LifecycleError::Build {
            step: "build",
            diagnostic: format!("{:#}", e),
        })?;

        self.tools.build_all(&ctx).map_err(|e| LifecycleError::Build {
            step: "build",
            diagnostic: format!("{:#}", e),
        })?;

        self.state = LifecycleState::Built;
        Ok(())
    }

    /// Install artifacts into `output_root` and guarantee the public headers
    /// are present under `include/<namespace>`.
    ///
    /// The header re-copy runs unconditionally and overwrites whatever the
    /// external install step produced, so the installed header set is a
    /// superset of a bare install. Copies are whole-file overwrites; running
    /// this twice yields an identical output directory.
    pub fn package(&mut self, output_root: &Path) -> Result<InstalledArtifactSet, LifecycleError> {
        self.require("package", LifecycleState::Built, LifecycleState::Packaged)?;

        let header_src = self.descriptor.header_source_dir(&self.root);
        if !header_src.is_dir() {
            return Err(self.packaging_error(format!(
                "header source subpath {} does not exist",
                header_src.display()
            )));
        }

        ensure_dir(output_root).map_err(|e| {
            self.packaging_error(format!(
                "output root {} is not writable: {:#}",
                output_root.display(),
                e
            ))
        })?;

        let ctx = self.step_context();
        self.tools
            .install(&ctx, output_root)
            .map_err(|e| self.packaging_error(format!("{:#}", e)))?;

        let header_dst = output_root
            .join("include")
            .join(&self.descriptor.include_namespace);
        let copied = copy_glob(&header_src, HEADER_GLOB, &header_dst)
            .map_err(|e| self.packaging_error(format!("{:#}", e)))?;
        tracing::info!(
            "Copied {} header(s) into {}",
            copied.len(),
            header_dst.display()
        );

        self.state = LifecycleState::Packaged;
        Ok(scan_artifacts(output_root))
    }

    /// Export metadata for downstream consumers.
    ///
    /// Pure function of the descriptor name; calling it twice yields
    /// identical output.
    pub fn export_consumer_metadata(&mut self) -> Result<ConsumerMetadata, LifecycleError> {
        self.require(
            "package_info",
            LifecycleState::Packaged,
            LifecycleState::MetadataExported,
        )?;

        self.state = LifecycleState::MetadataExported;
        Ok(ConsumerMetadata::for_package(&self.descriptor))
    }

    /// Check the step may run now. Returns true when this is an idempotent
    /// re-run from the step's own completed state.
    fn require(
        &self,
        attempted: &'static str,
        required: LifecycleState,
        own: LifecycleState,
    ) -> Result<bool, LifecycleError> {
        if self.state == required {
            Ok(false)
        } else if self.state == own {
            Ok(true)
        } else {
            Err(LifecycleError::Sequence {
                attempted,
                required,
                actual: self.state,
            })
        }
    }

    fn layout(&self) -> &FolderLayout {
        self.layout.as_ref().expect("layout resolved before later steps")
    }

    fn step_context(&self) -> StepContext {
        let layout = self.layout();
        let mut ctx = StepContext::new(layout.source_dir(&self.root), layout.build_dir(&self.root))
            .with_jobs(self.jobs)
            .with_verbose(self.verbose);
        if let Some(ref tc) = self.toolchain {
            ctx = ctx.with_machine_file(tc.machine_file.clone());
        }
        ctx
    }

    fn source_error(&self, diagnostic: String) -> LifecycleError {
        LifecycleError::SourceAcquisition {
            step: "source",
            url: self.descriptor.url.to_string(),
            tag: self.descriptor.source_tag(),
            diagnostic,
        }
    }

    fn packaging_error(&self, diagnostic: String) -> LifecycleError {
        LifecycleError::Packaging {
            step: "package",
            diagnostic,
        }
    }
}

/// Scan a package output directory for installed headers and libraries.
fn scan_artifacts(output_root: &Path) -> InstalledArtifactSet {
    let headers = collect_files_with_extensions(&output_root.join("include"), &["h"]);

    let mut libraries = Vec::new();
    for lib_subdir in ["lib", "lib64"] {
        libraries.extend(collect_files_with_extensions(
            &output_root.join(lib_subdir),
            LIBRARY_EXTENSIONS,
        ));
    }
    libraries.sort();

    InstalledArtifactSet { headers, libraries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::{Arch, BuildSettings, BuildType, Compiler, TargetOs};
    use crate::test_support::FakeTools;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_root() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let headers = tmp.path().join("code/logic/fossil/ai");
        fs::create_dir_all(&headers).unwrap();
        fs::write(headers.join("jellyfish.h"), "// jellyfish api\n").unwrap();
        fs::write(headers.join("iochat.h"), "// iochat api\n").unwrap();
        tmp
    }

    fn orchestrator(tmp: &TempDir, tools: FakeTools) -> Orchestrator<FakeTools> {
        Orchestrator::new(PackageDescriptor::fossil_jellyfish(), tools, tmp.path())
    }

    #[test]
    fn test_full_lifecycle() {
        let tmp = fixture_root();
        let output = tmp.path().join("package");
        let mut orch = orchestrator(&tmp, FakeTools::new());

        let layout = orch.resolve_layout().clone();
        assert_eq!(layout.source_root, Path::new("."));

        orch.generate_toolchain().unwrap();
        let src = orch.acquire_source().unwrap();
        assert!(src.ends_with("fossil-jellyfish"));

        orch.build().unwrap();
        let artifacts = orch.package(&output).unwrap();
        let metadata = orch.export_consumer_metadata().unwrap();

        assert_eq!(orch.state(), LifecycleState::MetadataExported);
        assert_eq!(metadata.libs, vec!["fossil_jellyfish".to_string()]);
        assert_eq!(artifacts.headers.len(), 2);

        let calls = orch.tools.calls();
        assert_eq!(calls, vec!["fetch_tag", "configure", "build_all", "install"]);
    }

    #[test]
    fn test_build_before_source_is_sequence_error() {
        let tmp = fixture_root();
        let mut orch = orchestrator(&tmp, FakeTools::new());

        orch.resolve_layout();
        let err = orch.build().unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Sequence {
                attempted: "build",
                ..
            }
        ));
    }

    #[test]
    fn test_package_info_before_package_is_sequence_error() {
        let tmp = fixture_root();
        let mut orch = orchestrator(&tmp, FakeTools::new());

        let err = orch.export_consumer_metadata().unwrap_err();
        assert!(matches!(err, LifecycleError::Sequence { .. }));
    }

    #[test]
    fn test_resolve_layout_ignores_prior_state() {
        let tmp = fixture_root();
        let mut orch = orchestrator(&tmp, FakeTools::new());

        orch.resolve_layout();
        orch.generate_toolchain().unwrap();
        orch.acquire_source().unwrap();

        // Re-resolving mid-run neither fails nor rewinds the state machine.
        let layout = orch.resolve_layout().clone();
        assert_eq!(layout.build_root, Path::new("builddir"));
        assert_eq!(orch.state(), LifecycleState::SourceAcquired);
    }

    #[test]
    fn test_headers_copied_even_when_install_skips_them() {
        let tmp = fixture_root();
        let output = tmp.path().join("package");
        let mut orch = orchestrator(&tmp, FakeTools::new().without_installed_headers());

        orch.resolve_layout();
        orch.generate_toolchain().unwrap();
        orch.acquire_source().unwrap();
        orch.build().unwrap();
        let artifacts = orch.package(&output).unwrap();

        let include = output.join("include/fossil/ai");
        assert!(include.join("jellyfish.h").exists());
        assert!(include.join("iochat.h").exists());
        assert_eq!(artifacts.headers.len(), 2);
    }

    #[test]
    fn test_package_twice_is_idempotent() {
        let tmp = fixture_root();
        let output = tmp.path().join("package");
        let mut orch = orchestrator(&tmp, FakeTools::new());

        orch.resolve_layout();
        orch.generate_toolchain().unwrap();
        orch.acquire_source().unwrap();
        orch.build().unwrap();

        let first = orch.package(&output).unwrap();
        let second = orch.package(&output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_acquire_source_rejects_non_empty_target() {
        let tmp = fixture_root();
        let clone_dir = tmp.path().join("fossil-jellyfish");
        fs::create_dir_all(&clone_dir).unwrap();
        fs::write(clone_dir.join("stale"), "leftover").unwrap();

        let mut orch = orchestrator(&tmp, FakeTools::new());
        orch.resolve_layout();
        orch.generate_toolchain().unwrap();

        let err = orch.acquire_source().unwrap_err();
        assert!(matches!(err, LifecycleError::SourceAcquisition { .. }));
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_acquire_source_rerun_is_noop() {
        let tmp = fixture_root();
        let mut orch = orchestrator(&tmp, FakeTools::new());

        orch.resolve_layout();
        orch.generate_toolchain().unwrap();
        orch.acquire_source().unwrap();
        orch.acquire_source().unwrap();

        // The fetch itself ran exactly once.
        let fetches = orch
            .tools
            .calls()
            .iter()
            .filter(|c| *c == "fetch_tag")
            .count();
        assert_eq!(fetches, 1);
    }

    #[test]
    fn test_invalid_settings_fail_generate() {
        let tmp = fixture_root();
        let descriptor = PackageDescriptor::fossil_jellyfish().with_settings(BuildSettings {
            os: TargetOs::Linux,
            compiler: Compiler::Msvc,
            build_type: BuildType::Debug,
            arch: Arch::X86_64,
        });
        let mut orch = Orchestrator::new(descriptor, FakeTools::new(), tmp.path());

        orch.resolve_layout();
        let err = orch.generate_toolchain().unwrap_err();
        assert!(matches!(err, LifecycleError::ToolchainGeneration { .. }));
    }

    #[test]
    fn test_build_failure_carries_diagnostic() {
        let tmp = fixture_root();
        let mut orch = orchestrator(&tmp, FakeTools::new().failing_at("build_all"));

        orch.resolve_layout();
        orch.generate_toolchain().unwrap();
        orch.acquire_source().unwrap();

        let err = orch.build().unwrap_err();
        assert_eq!(err.step(), "build");
        assert!(err.to_string().contains("fake build_all failure"));
    }

    #[test]
    fn test_package_missing_header_subpath_fails() {
        let tmp = TempDir::new().unwrap();
        let mut orch = orchestrator_without_headers(&tmp);

        orch.resolve_layout();
        orch.generate_toolchain().unwrap();
        orch.acquire_source().unwrap();
        orch.build().unwrap();

        let err = orch.package(&tmp.path().join("package")).unwrap_err();
        assert!(matches!(err, LifecycleError::Packaging { .. }));
        assert!(err.to_string().contains("header source subpath"));
    }

    fn orchestrator_without_headers(tmp: &TempDir) -> Orchestrator<FakeTools> {
        Orchestrator::new(
            PackageDescriptor::fossil_jellyfish(),
            FakeTools::new(),
            tmp.path(),
        )
    }
}
