use kiln_config::{ConfigValidator, FsValidator, ProjectLayout, SchemaValidator};
use tracing::info;

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::ui;

/// Validate the layout, stopping at the first problem.
pub fn execute(args: CheckArgs, layout: &ProjectLayout) -> Result<()> {
    if args.schema_only {
        SchemaValidator.validate(layout)?;
        ui::success("kiln.toml values are valid");
        return Ok(());
    }

    FsValidator.validate(layout)?;

    if let Some(entry) = FsValidator::resolve_entry(layout) {
        info!(entry = %entry.display(), "entry resolved");
    }
    ui::success(&format!(
        "Project layout at {} is valid",
        layout.root.display()
    ));
    Ok(())
}
