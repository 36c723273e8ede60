//! `jellypack generate` command

use anyhow::Result;

use crate::cli::StepArgs;
use crate::commands::orchestrator_for;

pub fn execute(args: StepArgs, verbose: bool) -> Result<()> {
    let mut orch = orchestrator_for(&args, verbose)?;

    orch.resolve_layout();
    let toolchain = orch.generate_toolchain()?;

    eprintln!("    Generated {}", toolchain.machine_file.display());
    Ok(())
}
