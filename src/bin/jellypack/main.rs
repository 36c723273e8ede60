//! Jellypack CLI - packaging driver for the Fossil Jellyfish C library

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("jellypack=debug")
    } else {
        EnvFilter::new("jellypack=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Layout(args) => commands::layout::execute(args),
        Commands::Generate(args) => commands::generate::execute(args, cli.verbose),
        Commands::Source(args) => commands::source::execute(args, cli.verbose),
        Commands::Build(args) => commands::build::execute(args, cli.verbose),
        Commands::Package(args) => commands::package::execute(args, cli.verbose),
        Commands::PackageInfo(args) => commands::package_info::execute(args),
        Commands::Create(args) => commands::create::execute(args, cli.verbose),
        Commands::ListTests(args) => commands::list_tests::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
