//! File-based layout discovery for CLI use
//!
//! Layers layout overrides in increasing priority: built-in defaults,
//! `kiln.toml` in the project root (or an explicit file), then `KILN_*`
//! environment variables.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::layout::ProjectLayout;

pub const CONFIG_FILE: &str = "kiln.toml";
pub const ENV_PREFIX: &str = "KILN_";

/// File-based layout discovery
///
/// # Example
///
/// ```no_run
/// use kiln_config::ConfigDiscovery;
///
/// let layout = ConfigDiscovery::new(".").load().unwrap();
/// println!("serving on port {}", layout.dev_port);
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    config_file: Option<PathBuf>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config_file: None,
        }
    }

    /// Use an explicit config file instead of `<root>/kiln.toml`.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Locate the config file, if any.
    ///
    /// An explicit file is returned whether or not it exists so that
    /// [`ConfigDiscovery::load`] can report it missing.
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_file {
            return Some(path.clone());
        }

        let toml_path = self.root.join(CONFIG_FILE);
        toml_path.is_file().then_some(toml_path)
    }

    /// The layered provider chain, before extraction.
    pub fn figment(&self) -> Result<Figment> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(ProjectLayout::rooted(&self.root)));

        if let Some(path) = self.find() {
            if !path.is_file() {
                return Err(ConfigError::NotFound { path });
            }
            debug!(path = %path.display(), "loading layout overrides");
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    pub fn load(&self) -> Result<ProjectLayout> {
        let layout = Self::extract(self.figment()?)?;
        Ok(self.anchor(layout))
    }

    /// Extract a layout from any provider chain.
    pub fn extract(figment: Figment) -> Result<ProjectLayout> {
        figment.extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "layout".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                hint: Some(e.to_string()),
            }
        })
    }

    // A relative `root` from the file or environment is taken relative to
    // the discovery root.
    fn anchor(&self, mut layout: ProjectLayout) -> ProjectLayout {
        if layout.root != self.root && layout.root.is_relative() {
            layout.root = self.root.join(&layout.root);
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn find_discovers_toml_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "dev_port = 4000\n").unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), config_path);
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path())
            .with_config_file(dir.path().join("custom.toml"))
            .load();
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn extract_reports_offending_field() {
        let figment = Figment::new()
            .merge(Serialized::defaults(ProjectLayout::default()))
            .merge(Toml::string("dev_port = \"not a port\""));
        match ConfigDiscovery::extract(figment) {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "dev_port"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn relative_root_override_is_anchored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "root = \"frontend\"\n").unwrap();

        let layout = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(layout.root, dir.path().join("frontend"));
    }
}
