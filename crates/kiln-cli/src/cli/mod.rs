//! Command-line interface definition.
//!
//! - `kiln config` - print the assembled build configuration
//! - `kiln check` - validate the project layout
//! - `kiln emit` - run the output pipeline for engine-built assets
//! - `kiln serve` - development server with reload events
//! - `kiln schema` - print the `kiln.toml` JSON schema

mod commands;
mod tests;

use std::path::PathBuf;

use clap::Parser;
use kiln_config::{BuildMode, MODE_ENV_VAR};

pub use commands::{CheckArgs, Command, ConfigArgs, EmitArgs, SchemaArgs, ServeArgs};

/// Kiln - typed build configuration for frontend projects
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Typed build configuration for frontend projects",
    long_about = "Kiln assembles the complete bundler configuration for a project from\n\
                  its build mode and directory layout, validates the layout, renders the\n\
                  HTML shell and serves the output directory during development."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Build mode: `development` or `production`
    ///
    /// Falls back to NODE_ENV. Any other value selects the fallback policy.
    #[arg(long, global = true, env = MODE_ENV_VAR, value_name = "MODE")]
    pub mode: Option<String>,

    /// Project root
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Layout file to use instead of `<root>/kiln.toml`
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The build mode selected by `--mode` or `NODE_ENV`.
    pub fn build_mode(&self) -> BuildMode {
        BuildMode::from_env_value(self.mode.as_deref())
    }
}
