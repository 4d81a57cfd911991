mod commands;
mod format;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{closure::ClosureArgs, resolve::ResolveArgs};

#[derive(Parser)]
#[command(name = "typemapgen", about = "Resolve class graphs into MPI typemap listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a forest and print the dependency-ordered typemap
    Resolve(ResolveArgs),
    /// Print every class reachable from the declared universe
    Closure(ClosureArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => args.run(),
        Commands::Closure(args) => args.run(),
    }
}
