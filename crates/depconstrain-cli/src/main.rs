//! depconstrain CLI
//!
//! Command-line interface for checking and formatting dependency constraint files

use clap::{Parser, Subcommand};
use depconstrain_core::errors::ConstrainError;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "depconstrain")]
#[command(about = "depconstrain - Dependency constraint file checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load and validate the constraints file of a directory
    Check(commands::check::CheckArgs),
    /// Rewrite a dependency-constraints.json file in canonical form
    Fmt(commands::fmt::FmtArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Fmt(args) => commands::fmt::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", render_error(e.as_ref()));
        std::process::exit(1);
    }
}

fn render_error(err: &(dyn std::error::Error + 'static)) -> String {
    match err.downcast_ref::<ConstrainError>() {
        Some(constrain_err) => constrain_err.render_chain(),
        None => err.to_string(),
    }
}
