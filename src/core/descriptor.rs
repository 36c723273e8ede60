//! Package descriptor: the immutable identity of the packaged library.
//!
//! The descriptor is constructed once at process start and passed explicitly
//! into the orchestrator. Nothing mutates it during a lifecycle run.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};
use url::Url;

/// Target operating system, as recognized by the build settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Macos,
    Windows,
}

impl TargetOs {
    /// Detect the host operating system.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_os = "macos") {
            TargetOs::Macos
        } else {
            TargetOs::Linux
        }
    }

    /// Meson `system` value for the host machine section.
    pub fn as_meson_system(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Macos => "darwin",
            TargetOs::Windows => "windows",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetOs::Linux => "linux",
            TargetOs::Macos => "macos",
            TargetOs::Windows => "windows",
        })
    }
}

impl FromStr for TargetOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(TargetOs::Linux),
            "macos" | "darwin" => Ok(TargetOs::Macos),
            "windows" => Ok(TargetOs::Windows),
            other => Err(format!("unknown operating system: `{}`", other)),
        }
    }
}

/// C compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compiler {
    Gcc,
    Clang,
    #[serde(rename = "apple-clang")]
    AppleClang,
    Msvc,
}

impl Compiler {
    /// Default compiler for an operating system.
    pub fn default_for(os: TargetOs) -> Self {
        match os {
            TargetOs::Linux => Compiler::Gcc,
            TargetOs::Macos => Compiler::AppleClang,
            TargetOs::Windows => Compiler::Msvc,
        }
    }

    /// The `c` binary name Meson should invoke.
    pub fn c_binary(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang | Compiler::AppleClang => "clang",
            Compiler::Msvc => "cl",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::AppleClang => "apple-clang",
            Compiler::Msvc => "msvc",
        })
    }
}

impl FromStr for Compiler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" => Ok(Compiler::Gcc),
            "clang" => Ok(Compiler::Clang),
            "apple-clang" | "appleclang" => Ok(Compiler::AppleClang),
            "msvc" | "cl" => Ok(Compiler::Msvc),
            other => Err(format!("unknown compiler: `{}`", other)),
        }
    }
}

/// Build type (optimization/debug profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    #[default]
    Debug,
    Release,
    #[serde(rename = "relwithdebinfo")]
    RelWithDebInfo,
}

impl BuildType {
    /// Meson `buildtype` option value.
    pub fn as_meson_buildtype(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
            BuildType::RelWithDebInfo => "debugoptimized",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
            BuildType::RelWithDebInfo => "relwithdebinfo",
        })
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" | "debugoptimized" => Ok(BuildType::RelWithDebInfo),
            other => Err(format!("unknown build type: `{}`", other)),
        }
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Arch {
    /// Detect the host architecture.
    pub fn host() -> Self {
        if cfg!(target_arch = "aarch64") {
            Arch::Aarch64
        } else {
            Arch::X86_64
        }
    }

    /// Meson `cpu_family` value.
    pub fn as_meson_cpu_family(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_meson_cpu_family())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "aarch64" | "arm64" => Ok(Arch::Aarch64),
            other => Err(format!("unknown architecture: `{}`", other)),
        }
    }
}

/// Recognized build settings for one lifecycle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSettings {
    pub os: TargetOs,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl BuildSettings {
    /// Settings matching the host machine with the default compiler.
    pub fn host() -> Self {
        let os = TargetOs::host();
        BuildSettings {
            os,
            compiler: Compiler::default_for(os),
            build_type: BuildType::default(),
            arch: Arch::host(),
        }
    }

    /// Validate the os/compiler combination.
    ///
    /// Returns a human-readable reason when the combination cannot produce
    /// a toolchain (e.g. MSVC targeting a non-Windows system).
    pub fn validate(&self) -> Result<(), String> {
        match (self.compiler, self.os) {
            (Compiler::Msvc, os) if os != TargetOs::Windows => Err(format!(
                "compiler `msvc` is only supported when targeting windows, not `{}`",
                os
            )),
            (Compiler::AppleClang, os) if os != TargetOs::Macos => Err(format!(
                "compiler `apple-clang` is only supported when targeting macos, not `{}`",
                os
            )),
            _ => Ok(()),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self::host()
    }
}

/// Package build options, with their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOptions {
    /// Build a shared library instead of a static one.
    pub shared: bool,
}

/// Immutable identity and configuration of the packaged library.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// Package name, also the library name exported to consumers.
    pub name: String,

    /// Exact version to package; the fetched tag is `v<version>`.
    pub version: Version,

    /// SPDX license identifier.
    pub license: String,

    /// Upstream author.
    pub author: String,

    /// Source repository URL.
    pub url: Url,

    /// Human-readable description.
    pub description: String,

    /// Topic tags.
    pub topics: Vec<String>,

    /// Build settings for this run.
    pub settings: BuildSettings,

    /// Build options for this run.
    pub options: PackageOptions,

    /// Subpath (relative to the working tree) holding the public headers.
    pub header_subdir: String,

    /// Namespace path under `include/` where headers are installed.
    pub include_namespace: String,
}

impl PackageDescriptor {
    /// The Fossil Jellyfish package, with host settings and default options.
    pub fn fossil_jellyfish() -> Self {
        PackageDescriptor {
            name: "fossil_jellyfish".to_string(),
            version: Version::new(0, 1, 4),
            license: "MPL-2.0".to_string(),
            author: "Fossil Logic <michaelbrockus@gmail.com>".to_string(),
            url: Url::parse("https://github.com/fossillogic/fossil-jellyfish")
                .expect("static package url is valid"),
            description: "Fossil Jellyfish is a lightweight, portable Truthful Intelligence \
                          and AI library written in pure C with zero external dependencies."
                .to_string(),
            topics: ["c", "ti", "chat", "nlp", "cpp", "meson", "mesonbuild", "ninja-build"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            settings: BuildSettings::host(),
            options: PackageOptions::default(),
            header_subdir: "code/logic/fossil/ai".to_string(),
            include_namespace: "fossil/ai".to_string(),
        }
    }

    /// Replace the build settings.
    pub fn with_settings(mut self, settings: BuildSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the build options.
    pub fn with_options(mut self, options: PackageOptions) -> Self {
        self.options = options;
        self
    }

    /// Git tag pinning this package's source.
    pub fn source_tag(&self) -> String {
        format!("v{}", self.version)
    }

    /// Header source directory under a working tree root.
    pub fn header_source_dir(&self, root: &Path) -> std::path::PathBuf {
        root.join(&self.header_subdir)
    }
}
