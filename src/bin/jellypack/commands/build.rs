//! `jellypack build` command

use anyhow::Result;

use crate::cli::StepArgs;
use crate::commands::{ensure_build_tools, orchestrator_for};

pub fn execute(args: StepArgs, verbose: bool) -> Result<()> {
    ensure_build_tools()?;

    let mut orch = orchestrator_for(&args, verbose)?;

    orch.resolve_layout();
    orch.generate_toolchain()?;
    orch.acquire_source()?;
    orch.build()?;

    eprintln!("    Finished `{}`", orch.descriptor().name);
    Ok(())
}
