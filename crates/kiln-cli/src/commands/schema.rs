use kiln_config::ProjectLayout;

use crate::cli::SchemaArgs;
use crate::error::Result;

/// Print the JSON schema describing `kiln.toml`.
pub fn execute(args: SchemaArgs) -> Result<()> {
    let schema = ProjectLayout::json_schema();
    let json = if args.compact {
        serde_json::to_string(&schema)?
    } else {
        serde_json::to_string_pretty(&schema)?
    };
    println!("{json}");
    Ok(())
}
