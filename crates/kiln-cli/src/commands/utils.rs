//! Shared helpers for commands.

use std::path::Path;

use kiln_config::{BuildMode, ConfigDiscovery, ProjectLayout};
use tracing::debug;

use crate::error::Result;
use crate::ui;

/// Parse the raw `--mode`/`NODE_ENV` value, warning when it selects the
/// fallback policy.
pub fn resolve_mode(raw: Option<&str>) -> BuildMode {
    let mode = BuildMode::from_env_value(raw);
    if !mode.is_recognized() {
        let shown = raw.unwrap_or("<unset>");
        ui::warning(&format!(
            "Unrecognized build mode '{shown}'; using hashed names, inline source maps and no minification"
        ));
    }
    debug!(mode = %mode, "resolved build mode");
    mode
}

/// Load the project layout from `root`, layering `kiln.toml` (or `config`)
/// and `KILN_*` variables over the defaults.
pub fn load_layout(root: &Path, config: Option<&Path>) -> Result<ProjectLayout> {
    let mut discovery = ConfigDiscovery::new(root);
    if let Some(path) = config {
        discovery = discovery.with_config_file(path);
    }

    let layout = discovery.load()?;
    debug!(
        root = %layout.root.display(),
        output = %layout.output_path().display(),
        "loaded project layout"
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_mode_handles_all_values() {
        assert_eq!(resolve_mode(Some("development")), BuildMode::Development);
        assert_eq!(resolve_mode(Some("production")), BuildMode::Production);
        assert_eq!(resolve_mode(Some("Production")), BuildMode::Unrecognized);
        assert_eq!(resolve_mode(None), BuildMode::Unrecognized);
    }

    #[test]
    fn load_layout_reads_explicit_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("site.toml");
        fs::write(&file, "output_dir = \"public\"\n").unwrap();

        let layout = load_layout(dir.path(), Some(&file)).unwrap();
        assert_eq!(layout.output_path(), dir.path().join("public"));
    }

    #[test]
    fn load_layout_reports_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_layout(dir.path(), Some(&missing)).is_err());
    }
}
