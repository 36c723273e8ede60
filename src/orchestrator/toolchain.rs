//! Toolchain generation: renders a Meson native machine file from the
//! package descriptor's settings and options.
//!
//! The config is ephemeral - produced by the generate step, consumed by the
//! build step, never persisted beyond one lifecycle run.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::descriptor::PackageDescriptor;
use crate::util::fs::ensure_dir;

/// File name of the generated machine file inside the build directory.
pub const MACHINE_FILE_NAME: &str = "jellypack-native.ini";

/// Toolchain configuration written to the build environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Path to the rendered machine file.
    pub machine_file: PathBuf,

    /// Meson buildtype value.
    pub buildtype: String,

    /// Meson default_library value (static or shared).
    pub default_library: String,
}

impl ToolchainConfig {
    /// Render and write the machine file for `descriptor` under `build_dir`.
    ///
    /// Callers validate the settings combination beforehand; this only
    /// fails on I/O.
    pub fn generate(descriptor: &PackageDescriptor, build_dir: &Path) -> Result<Self> {
        let buildtype = descriptor.settings.build_type.as_meson_buildtype().to_string();
        let default_library = if descriptor.options.shared {
            "shared".to_string()
        } else {
            "static".to_string()
        };

        let machine_file = build_dir.join(MACHINE_FILE_NAME);
        let contents = render_machine_file(descriptor, &buildtype, &default_library);

        ensure_dir(build_dir)?;
        std::fs::write(&machine_file, contents)?;

        tracing::debug!("Wrote machine file: {}", machine_file.display());

        Ok(ToolchainConfig {
            machine_file,
            buildtype,
            default_library,
        })
    }
}

fn render_machine_file(
    descriptor: &PackageDescriptor,
    buildtype: &str,
    default_library: &str,
) -> String {
    let settings = &descriptor.settings;
    format!(
        "[binaries]\n\
         c = '{c}'\n\
         \n\
         [built-in options]\n\
         buildtype = '{buildtype}'\n\
         default_library = '{default_library}'\n\
         \n\
         [host_machine]\n\
         system = '{system}'\n\
         cpu_family = '{cpu_family}'\n\
         cpu = '{cpu_family}'\n\
         endian = 'little'\n",
        c = settings.compiler.c_binary(),
        system = settings.os.as_meson_system(),
        cpu_family = settings.arch.as_meson_cpu_family(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::{BuildType, PackageOptions};
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_machine_file() {
        let tmp = TempDir::new().unwrap();
        let build_dir = tmp.path().join("builddir");
        let desc = PackageDescriptor::fossil_jellyfish();

        let tc = ToolchainConfig::generate(&desc, &build_dir).unwrap();
        assert!(tc.machine_file.exists());
        assert_eq!(tc.default_library, "static");

        let contents = std::fs::read_to_string(&tc.machine_file).unwrap();
        assert!(contents.contains("[binaries]"));
        assert!(contents.contains("buildtype = 'debug'"));
        assert!(contents.contains("default_library = 'static'"));
        assert!(contents.contains("[host_machine]"));
    }

    #[test]
    fn test_shared_option_selects_shared_library() {
        let tmp = TempDir::new().unwrap();
        let desc = PackageDescriptor::fossil_jellyfish()
            .with_options(PackageOptions { shared: true });

        let tc = ToolchainConfig::generate(&desc, tmp.path()).unwrap();
        assert_eq!(tc.default_library, "shared");
    }

    #[test]
    fn test_build_type_flows_through() {
        let tmp = TempDir::new().unwrap();
        let mut desc = PackageDescriptor::fossil_jellyfish();
        desc.settings.build_type = BuildType::Release;

        let tc = ToolchainConfig::generate(&desc, tmp.path()).unwrap();
        assert_eq!(tc.buildtype, "release");
    }
}
