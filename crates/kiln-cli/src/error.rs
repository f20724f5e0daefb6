//! Error handling for the Kiln CLI.
//!
//! [`CliError`] is what every command returns. Library errors from
//! `kiln-config` convert automatically; [`cli_error_to_miette`] turns the
//! final error into a rendered diagnostic in `main`.
//!
//! ```rust,no_run
//! use kiln_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_template(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod report;

use std::path::PathBuf;

use thiserror::Error;

pub use report::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    /// Layout loading, validation or output errors
    #[error(transparent)]
    Config(#[from] kiln_config::ConfigError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_config::ConfigError;
    use std::io;

    #[test]
    fn config_errors_keep_their_message() {
        let err: CliError = ConfigError::EntryNotFound {
            path: PathBuf::from("src/index"),
        }
        .into();
        assert!(err.to_string().contains("src/index"));
    }

    #[test]
    fn with_path_maps_not_found() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        match result.with_path("dist/index.html") {
            Err(CliError::FileNotFound(path)) => assert_eq!(path, PathBuf::from("dist/index.html")),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn with_path_keeps_other_io_errors() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(result.with_path("dist"), Err(CliError::Io(_))));
    }
}
