//! Command implementations.

pub mod build;
pub mod completions;
pub mod create;
pub mod generate;
pub mod layout;
pub mod package;
pub mod package_info;
pub mod source;

use anyhow::{bail, Result};

use jellypack::backend::MesonTools;
use jellypack::core::descriptor::{BuildSettings, PackageOptions};
use jellypack::util::config::{config_path, Config};
use jellypack::{Orchestrator, PackageDescriptor};

use crate::cli::StepArgs;

/// Build an orchestrator for one run from CLI flags and the project config.
///
/// Precedence: CLI flags over `.jellypack/config.toml` over descriptor
/// defaults. The descriptor is constructed once here and immutable after.
pub(crate) fn orchestrator_for(
    args: &StepArgs,
    verbose: bool,
) -> Result<Orchestrator<MesonTools>> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let config = Config::load_or_default(&config_path(&root));

    let mut settings = BuildSettings::host();
    if let Some(ref build_type) = args.build_type {
        settings.build_type = build_type
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid build type: {}", e))?;
    } else if let Some(build_type) = config.build.build_type {
        settings.build_type = build_type;
    }

    if let Some(ref compiler) = args.compiler {
        settings.compiler = compiler
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid compiler: {}", e))?;
    }

    let shared = args.shared || config.build.shared.unwrap_or(false);
    let jobs = args.jobs.or(config.build.jobs);

    let descriptor = PackageDescriptor::fossil_jellyfish()
        .with_settings(settings)
        .with_options(PackageOptions { shared });

    Ok(Orchestrator::new(descriptor, MesonTools::new(), root)
        .with_jobs(jobs)
        .with_verbose(verbose))
}

/// Check that meson and ninja are installed before a build-invoking step.
pub(crate) fn ensure_build_tools() -> Result<()> {
    if let Some(message) = MesonTools::availability().error_message() {
        bail!(message);
    }
    if !MesonTools::ninja_available() {
        bail!("ninja not found (required by Meson): https://ninja-build.org/");
    }
    Ok(())
}
