//! Check command
//!
//! Usage: depconstrain check <DIR> [--strict] [--config <FILE>] [--log-format text|json]

use clap::{Args, ValueEnum};
use depconstrain_core::config::LoaderConfig;
use depconstrain_core::errors::ConstrainError;
use depconstrain_core::logging_facility::{init, Profile};
use depconstrain_core::model::SortPolicy;
use depconstrain_loader::load_constraints;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Directory holding constraints.xml or dependency-constraints.json
    pub dir: PathBuf,

    /// Require constraints sorted by group:name:suggestedVersion
    #[arg(long)]
    pub strict: bool,

    /// Loader configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit operation logs to stderr in this format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn profile(self) -> Profile {
        match self {
            LogFormat::Text => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

/// Execute check command
pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(format) = args.log_format {
        init(format.profile());
    }

    let mut config = match &args.config {
        Some(path) => LoaderConfig::from_file(path).map_err(ConstrainError::from)?,
        None => LoaderConfig::default(),
    };
    if args.strict {
        config = config.with_sort_policy(SortPolicy::Strict);
    }

    let set = load_constraints(&args.dir, &config)?;
    tracing::debug!(constraint_count = set.len(), "Check passed");

    for constraint in &set {
        println!("{}", constraint.coordinate());
    }

    Ok(())
}
