//! `jellypack create` command - the full packaging lifecycle.

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
    let metadata = orch.export_consumer_metadata()?;

    eprintln!(
        "    Packaged `{}` {} -> {}",
        orch.descriptor().name,
        orch.descriptor().version,
        args.output.display()
    );
    eprintln!(
        "    {} headers, {} libraries",
        artifacts.headers.len(),
        artifacts.libraries.len()
    );
    println!("libs: {}", metadata.libs.join(", "));
    println!("includedirs: {}", metadata.includedirs.join(", "));

    Ok(())
}
