//! Fmt command
//!
//! Usage: depconstrain fmt <FILE> [--write]

use clap::Args;
use depconstrain_loader::{canonicalize, Encoding};
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FmtArgs {
    /// Path to a dependency-constraints.json file
    pub file: PathBuf,

    /// Write the canonical form back to the file instead of printing it
    #[arg(long)]
    pub write: bool,
}

/// Execute fmt command
pub fn execute(args: FmtArgs) -> Result<(), Box<dyn std::error::Error>> {
    if Encoding::from_path(&args.file) != Some(Encoding::SchemaTree) {
        return Err(format!("{} is not a .json constraints file", args.file.display()).into());
    }

    let canonical = canonicalize(File::open(&args.file)?)?;

    if !args.write {
        print!("{}", canonical);
        return Ok(());
    }

    if fs::read_to_string(&args.file)? == canonical {
        println!("{} is already formatted", args.file.display());
    } else {
        fs::write(&args.file, &canonical)?;
        println!("Formatted {}", args.file.display());
    }

    Ok(())
}
