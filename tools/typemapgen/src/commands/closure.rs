use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use dox2mpi::{all_reachable_classes, parse_bundle};

#[derive(Args)]
pub struct ClosureArgs {
    /// Path to the declaration bundle file
    input: PathBuf,
}

impl ClosureArgs {
    pub fn run(self) -> Result<()> {
        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let source = parse_bundle(&text)?;
        for class in all_reachable_classes(&source) {
            println!("{class}");
        }
        Ok(())
    }
}
