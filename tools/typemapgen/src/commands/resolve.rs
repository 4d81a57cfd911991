use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use dox2mpi::{Mode, resolve_decl_str};

use crate::format::format_forest;

#[derive(Args)]
pub struct ResolveArgs {
    /// Path to the declaration bundle file
    input: PathBuf,

    /// Root classes to resolve (default: every declared class)
    #[arg(short, long, value_delimiter = ',')]
    roots: Vec<String>,

    /// Drop unresolvable members instead of failing
    #[arg(long)]
    lenient: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ResolveArgs {
    pub fn run(self) -> Result<()> {
        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let mode = if self.lenient {
            Mode::Lenient
        } else {
            Mode::Strict
        };
        let forest = resolve_decl_str(&text, &self.roots, mode)?;
        let listing = format_forest(&forest);

        match self.output {
            Some(path) => fs::write(path, listing)?,
            None => print!("{listing}"),
        }
        Ok(())
    }
}
