use kiln_config::{BuildConfig, BuildMode, ProjectLayout};

use crate::cli::ConfigArgs;
use crate::error::Result;

/// Print the assembled configuration for `mode` as JSON on stdout.
pub fn execute(args: ConfigArgs, mode: BuildMode, layout: &ProjectLayout) -> Result<()> {
    let config = BuildConfig::assemble(mode, layout);
    println!("{}", render(&config, args.compact)?);
    Ok(())
}

fn render(config: &BuildConfig, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(config)?
    } else {
        config.to_json_pretty()?
    };
    Ok(json)
}
