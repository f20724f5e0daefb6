//! Error types for configuration loading, validation and output emission.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry module not found: {}", .path.display())]
    EntryNotFound { path: PathBuf },

    #[error("HTML template not found: {}", .path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("static asset directory not found: {}", .path.display())]
    StaticDirNotFound { path: PathBuf },

    #[error("output path exists but is not a directory: {}", .path.display())]
    OutputNotDirectory { path: PathBuf },

    #[error(
        "output directory {} overlaps project sources at {}",
        .output.display(),
        .input.display()
    )]
    OutputOverlapsSources { output: PathBuf, input: PathBuf },

    // Config parsing/loading errors
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("invalid config value for '{field}'{}", hint_suffix(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}{}", hint_suffix(.hint))]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to render HTML template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" ({hint})"),
        None => String::new(),
    }
}
