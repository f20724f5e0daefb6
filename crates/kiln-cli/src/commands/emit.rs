use kiln_config::{AssetManifest, BuildConfig, BuildMode, OutputPipeline, ProjectLayout};

use crate::cli::EmitArgs;
use crate::error::Result;
use crate::ui;

/// Run the output pipeline for the assets named on the command line.
pub fn execute(args: EmitArgs, mode: BuildMode, layout: &ProjectLayout) -> Result<()> {
    kiln_config::validate_schema(layout)?;

    let config = BuildConfig::assemble(mode, layout);
    let manifest = AssetManifest::new(args.scripts, args.styles);
    let title = args.title.or_else(|| layout.title.clone());

    let report = OutputPipeline::new(&config)
        .with_title(title)
        .run(&manifest)?;

    ui::success(&format!(
        "Wrote {} file(s) to {}",
        report.written.len(),
        config.output.path.display()
    ));
    if !report.skipped.is_empty() {
        ui::info(&format!(
            "Left to the bundler: {}",
            report.skipped.join(", ")
        ));
    }
    Ok(())
}
