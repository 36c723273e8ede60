//! `jellypack source` command

use anyhow::Result;

use crate::cli::StepArgs;
use crate::commands::orchestrator_for;

pub fn execute(args: StepArgs, verbose: bool) -> Result<()> {
    let mut orch = orchestrator_for(&args, verbose)?;

    orch.resolve_layout();
    orch.generate_toolchain()?;
    let dest = orch.acquire_source()?;

    eprintln!(
        "    Fetched {} {} -> {}",
        orch.descriptor().name,
        orch.descriptor().source_tag(),
        dest.display()
    );
    Ok(())
}
