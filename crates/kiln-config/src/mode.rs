//! Build mode selection.
//!
//! The mode is read from the environment exactly once, at the edge of the
//! program, and then passed by value into every helper that branches on it.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`BuildMode::from_env`].
pub const MODE_ENV_VAR: &str = "NODE_ENV";

/// Build mode driving every mode-dependent field of a [`crate::BuildConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
    /// Any value other than `development` or `production`, including an
    /// absent or empty variable.
    ///
    /// Each field follows its own "not development" / "not production"
    /// branch: filenames are hashed, source maps are inlined, the dev server
    /// is configured without hot reload, and minification stays off.
    Unrecognized,
}

impl BuildMode {
    /// Map a raw environment value onto a mode. Matching is exact and
    /// case-sensitive.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("development") => BuildMode::Development,
            Some("production") => BuildMode::Production,
            _ => BuildMode::Unrecognized,
        }
    }

    /// Read the mode from `NODE_ENV`.
    pub fn from_env() -> Self {
        let value = std::env::var(MODE_ENV_VAR).ok();
        Self::from_env_value(value.as_deref())
    }

    pub fn is_development(self) -> bool {
        matches!(self, BuildMode::Development)
    }

    pub fn is_production(self) -> bool {
        matches!(self, BuildMode::Production)
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, BuildMode::Unrecognized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
            BuildMode::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_env_value(Some(s)))
    }
}
