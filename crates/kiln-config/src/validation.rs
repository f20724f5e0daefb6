//! Pluggable layout validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::layout::ProjectLayout;

/// Trait for pluggable layout validation strategies
pub trait ConfigValidator {
    fn validate(&self, layout: &ProjectLayout) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use kiln_config::{ConfigValidator, ProjectLayout, SchemaValidator};
///
/// SchemaValidator.validate(&ProjectLayout::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, layout: &ProjectLayout) -> Result<()> {
        if layout.entry.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "entry cannot be empty".to_string(),
                hint: Some("Point 'entry' at your application module, e.g. src/index".to_string()),
            });
        }

        if layout.dev_port == 0 {
            return Err(ConfigError::SchemaValidation {
                message: "dev_port cannot be 0".to_string(),
                hint: Some("Pick a port between 1 and 65535".to_string()),
            });
        }

        for extension in &layout.extensions {
            if !extension.starts_with('.') || extension.len() < 2 {
                return Err(ConfigError::SchemaValidation {
                    message: format!("extension '{extension}' must start with a dot"),
                    hint: Some("Write extensions as \".ts\", \".js\"".to_string()),
                });
            }
        }

        if layout.aliases.keys().any(|alias| alias.trim().is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: "alias names cannot be empty".to_string(),
                hint: Some("Remove empty keys from the 'aliases' table".to_string()),
            });
        }

        if let Some(input) = layout.output_overlap() {
            return Err(ConfigError::OutputOverlapsSources {
                output: layout.output_path(),
                input,
            });
        }

        if !layout.html_filename.ends_with(".html") {
            return Err(ConfigError::SchemaValidation {
                message: format!("html_filename '{}' must end in .html", layout.html_filename),
                hint: None,
            });
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that the entry module, HTML template
/// and static directory exist on disk.
pub struct FsValidator;

impl FsValidator {
    /// Resolve the entry module, trying each configured extension when the
    /// path has none on disk.
    pub fn resolve_entry(layout: &ProjectLayout) -> Option<PathBuf> {
        let entry = layout.entry_path();
        if entry.is_file() {
            return Some(entry);
        }

        layout.extensions.iter().find_map(|extension| {
            let mut candidate = entry.clone().into_os_string();
            candidate.push(extension);
            let candidate = PathBuf::from(candidate);
            candidate.is_file().then_some(candidate)
        })
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, layout: &ProjectLayout) -> Result<()> {
        SchemaValidator.validate(layout)?;

        let entry = Self::resolve_entry(layout).ok_or_else(|| ConfigError::EntryNotFound {
            path: layout.entry_path(),
        })?;
        debug!(entry = %entry.display(), "resolved entry module");

        let template = layout.template_path();
        if !template.is_file() {
            return Err(ConfigError::TemplateNotFound { path: template });
        }

        let static_dir = layout.static_path();
        if !static_dir.is_dir() {
            return Err(ConfigError::StaticDirNotFound { path: static_dir });
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(layout: &ProjectLayout) -> Result<()> {
    SchemaValidator.validate(layout)
}

/// Convenience function for filesystem validation
pub fn validate_fs(layout: &ProjectLayout) -> Result<()> {
    FsValidator.validate(layout)
}
