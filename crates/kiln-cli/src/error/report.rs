//! Conversion of CLI errors into miette reports.

use kiln_config::ConfigError;
use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a miette [`Report`], attaching a help line
/// where the fix is obvious.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::InvalidArgument(msg) => miette::miette!(
            code = "kiln::argument",
            help = "run `kiln --help` for usage",
            "Invalid argument: {}",
            msg
        ),
        CliError::Watch(e) => miette::miette!(
            code = "kiln::watch",
            help = "hot reload needs a readable output directory",
            "File watcher error: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    let help = match &err {
        ConfigError::EntryNotFound { .. } => Some("set `entry` in kiln.toml or create src/index.js"),
        ConfigError::TemplateNotFound { .. } => Some("set `template` in kiln.toml"),
        ConfigError::StaticDirNotFound { .. } => {
            Some("create the directory or point `static_dir` elsewhere")
        }
        ConfigError::NotFound { .. } => Some("check the path given to --config"),
        ConfigError::OutputOverlapsSources { .. } => {
            Some("point `output_dir` at a directory of its own, such as dist")
        }
        _ => None,
    };

    match help {
        Some(help) => miette::miette!(code = "kiln::config", help = help, "{}", err),
        None => miette::miette!(code = "kiln::config", "{}", err),
    }
}
