//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Jellypack - packaging and build orchestration for Fossil Jellyfish
#[derive(Parser)]
#[command(name = "jellypack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Lifecycle step commands run the package lifecycle from the beginning up
/// to and including the named step; a failed run is not resumable, so each
/// invocation expects a fresh working tree.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved source/build folder layout
    Layout(LayoutArgs),

    /// Generate the Meson toolchain machine file
    Generate(StepArgs),

    /// Fetch the tagged package source into the working tree
    Source(StepArgs),

    /// Configure and build the package
    Build(StepArgs),

    /// Build and install the package into an output directory
    Package(PackageArgs),

    /// Show metadata for downstream consumers of the package
    PackageInfo(PackageInfoArgs),

    /// Run the full packaging lifecycle
    Create(PackageArgs),

    /// List test-source files for the test harness
    ListTests(ListTestsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct LayoutArgs {
    /// Emit the layout as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct StepArgs {
    /// Working tree root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Build type (debug, release, relwithdebinfo)
    #[arg(long)]
    pub build_type: Option<String>,

    /// C compiler (gcc, clang, apple-clang, msvc)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Build a shared library instead of a static one
    #[arg(long)]
    pub shared: bool,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct PackageArgs {
    #[command(flatten)]
    pub step: StepArgs,

    /// Package output directory
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct PackageInfoArgs {
    /// Emit the metadata as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ListTestsArgs {
    /// Directory containing the `cases` directory (defaults to the current
    /// directory)
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
