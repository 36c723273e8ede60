//! `jellypack package` command

use anyhow::Result;

use crate::cli::PackageArgs;
use crate::commands::{ensure_build_tools, orchestrator_for};

pub fn execute(args: PackageArgs, verbose: bool) -> Result<()> {
    ensure_build_tools()?;

    let mut orch = orchestrator_for(&args.step, verbose)?;

    orch.resolve_layout();
    orch.generate_toolchain()?;
    orch.acquire_source()?;
    orch.build()?;
    let artifacts = orch.package(&args.output)?;

    eprintln!(
        "    Packaged `{}` -> {} ({} headers, {} libraries)",
        orch.descriptor().name,
        args.output.display(),
        artifacts.headers.len(),
        artifacts.libraries.len()
    );
    Ok(())
}
