//! Project layout: the filesystem inputs and outputs a build refers to.
//!
//! Nothing here depends on the build mode. Overrides come from `kiln.toml`
//! and `KILN_*` environment variables (see [`crate::discovery`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::helpers::{
    default_aliases, default_dev_port, default_entry, default_extensions, default_html_filename,
    default_output_dir, default_output_static, default_polyfill_entry, default_root,
    default_static_dir, default_template, normalize_path, paths_overlap,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectLayout {
    /// Project root; every relative path below is resolved against it
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Module prepended to the entry list (set to an empty string to disable)
    #[serde(default = "default_polyfill_entry")]
    pub polyfill_entry: Option<String>,

    /// Application entry module, without extension
    #[serde(default = "default_entry")]
    pub entry: PathBuf,

    /// HTML shell template
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Name of the generated HTML file inside the output directory
    #[serde(default = "default_html_filename")]
    pub html_filename: String,

    /// Page title exposed to the HTML template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Static assets copied verbatim into the output
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Output directory for generated files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Destination of copied static assets, relative to `output_dir`
    #[serde(default = "default_output_static")]
    pub output_static: PathBuf,

    /// Port of the development server
    #[serde(default = "default_dev_port")]
    pub dev_port: u16,

    /// Import aliases (e.g. "@" -> "src"), relative to `root`
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, PathBuf>,

    /// Extensions tried, in order, when resolving extension-less imports
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            root: default_root(),
            polyfill_entry: default_polyfill_entry(),
            entry: default_entry(),
            template: default_template(),
            html_filename: default_html_filename(),
            title: None,
            static_dir: default_static_dir(),
            output_dir: default_output_dir(),
            output_static: default_output_static(),
            dev_port: default_dev_port(),
            aliases: default_aliases(),
            extensions: default_extensions(),
        }
    }
}

impl ProjectLayout {
    /// Default layout anchored at `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Resolve a path against the project root. Absolute paths pass through.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn entry_path(&self) -> PathBuf {
        self.resolve(&self.entry)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template)
    }

    pub fn static_path(&self) -> PathBuf {
        self.resolve(&self.static_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn output_static_path(&self) -> PathBuf {
        self.output_path().join(&self.output_static)
    }

    /// First source path the output directory contains or sits inside of.
    ///
    /// Emission empties the output directory, so it must be disjoint from
    /// the root, the entry, the template and the static directory.
    pub fn output_overlap(&self) -> Option<PathBuf> {
        let output = self.output_path();
        let root = normalize_path(&self.root);
        if root.starts_with(normalize_path(&output)) {
            return Some(self.root.clone());
        }

        [self.entry_path(), self.template_path(), self.static_path()]
            .into_iter()
            .find(|input| paths_overlap(&output, input))
    }

    /// Polyfill module, ignoring empty strings.
    pub fn polyfill(&self) -> Option<&str> {
        self.polyfill_entry
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Add an import alias relative to the project root
    pub fn with_alias(mut self, alias: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.aliases.insert(alias.into(), path.into());
        self
    }

    /// JSON schema describing `kiln.toml`.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(ProjectLayout);
        schema.to_value()
    }
}
