//! Typed pipeline steps: loaders, output plugins and minimizers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single transformation applied to files matched by a [`crate::Rule`].
///
/// Chains run from last to first, the way the bundling engine applies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "loader", rename_all = "kebab-case")]
pub enum Loader {
    /// Transpile modern script syntax
    Babel,
    /// Inject compiled styles through a `<style>` tag at runtime
    Style,
    /// Interpret `@import` and `url()` in stylesheets
    Css,
    /// Vendor-prefix stylesheet output
    PostCss,
    /// Compile Sass/SCSS sources
    Sass,
    /// Hand compiled styles to the stylesheet extraction plugin
    ExtractCss { hmr: bool, reload_all: bool },
    /// Emit the file under `name` and return its public URL
    File { name: String },
}

/// HTML minification options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HtmlMinify {
    pub collapse_whitespace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Output-generating step, run in sequence around a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum Plugin {
    /// Empty the output directory before emitting
    Clean,
    /// Generate the HTML shell from a template
    Html {
        template: PathBuf,
        filename: String,
        minify: HtmlMinify,
    },
    /// Write extracted stylesheets under a name template
    ExtractCss { filename: String },
    /// Copy files verbatim
    Copy { patterns: Vec<CopyPattern> },
}

impl Plugin {
    pub fn name(&self) -> &'static str {
        match self {
            Plugin::Clean => "clean",
            Plugin::Html { .. } => "html",
            Plugin::ExtractCss { .. } => "extract-css",
            Plugin::Copy { .. } => "copy",
        }
    }
}

/// Minifier used when minimization is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Minimizer {
    Terser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loaders_serialize_as_tagged_variants() {
        assert_eq!(
            serde_json::to_value(Loader::PostCss).unwrap(),
            json!({ "loader": "post-css" })
        );
        assert_eq!(
            serde_json::to_value(Loader::ExtractCss {
                hmr: false,
                reload_all: true
            })
            .unwrap(),
            json!({ "loader": "extract-css", "hmr": false, "reload_all": true })
        );
    }

    #[test]
    fn plugin_round_trips_through_json() {
        let plugin = Plugin::Html {
            template: PathBuf::from("src/index.html"),
            filename: "index.html".to_string(),
            minify: HtmlMinify {
                collapse_whitespace: true,
            },
        };
        let value = serde_json::to_value(&plugin).unwrap();
        assert_eq!(value["plugin"], json!("html"));
        let back: Plugin = serde_json::from_value(value).unwrap();
        assert_eq!(back, plugin);
    }
}
