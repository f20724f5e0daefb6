//! The assembled build configuration.
//!
//! [`BuildConfig::assemble`] is a pure function of the build mode and the
//! project layout: it performs no I/O and never fails. For a fixed layout
//! the mode alone determines the result.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::layout::ProjectLayout;
use crate::mode::BuildMode;
use crate::naming::filename;
use crate::optimization::{optimization, OptimizationPolicy};
use crate::rules::{transform_rules, Rule};
use crate::steps::{CopyPattern, HtmlMinify, Plugin};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Name template for emitted scripts
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub extensions: Vec<String>,
    pub aliases: BTreeMap<String, PathBuf>,
}

/// Source map policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
    None,
    InlineSourceMap,
    SourceMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevServerPolicy {
    /// Directory served over HTTP
    pub content_base: PathBuf,
    pub port: u16,
    /// Push reload events to connected browsers
    pub hot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub mode: BuildMode,
    pub entries: Vec<String>,
    pub output: OutputOptions,
    pub resolve: ResolveOptions,
    pub devtool: Devtool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerPolicy>,
    pub plugins: Vec<Plugin>,
    pub optimization: OptimizationPolicy,
    pub rules: Vec<Rule>,
}

impl BuildConfig {
    /// Assemble the configuration for `mode` against the default layout.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{BuildConfig, BuildMode, Devtool};
    ///
    /// let config = BuildConfig::for_mode(BuildMode::Production);
    /// assert_eq!(config.devtool, Devtool::None);
    /// assert!(config.optimization.minimize);
    /// assert!(config.dev_server.is_none());
    /// ```
    pub fn for_mode(mode: BuildMode) -> Self {
        Self::assemble(mode, &ProjectLayout::default())
    }

    pub fn assemble(mode: BuildMode, layout: &ProjectLayout) -> Self {
        let output_path = layout.output_path();

        let mut entries = Vec::with_capacity(2);
        if let Some(polyfill) = layout.polyfill() {
            entries.push(polyfill.to_string());
        }
        entries.push(layout.entry_path().to_string_lossy().into_owned());

        let aliases = layout
            .aliases
            .iter()
            .map(|(alias, path)| (alias.clone(), layout.resolve(path)))
            .collect();

        let devtool = if mode.is_production() {
            Devtool::None
        } else {
            Devtool::InlineSourceMap
        };

        let dev_server = (!mode.is_production()).then(|| DevServerPolicy {
            content_base: output_path.clone(),
            port: layout.dev_port,
            hot: mode.is_development(),
        });

        let plugins = vec![
            Plugin::Clean,
            Plugin::Html {
                template: layout.template_path(),
                filename: layout.html_filename.clone(),
                minify: HtmlMinify {
                    collapse_whitespace: mode.is_production(),
                },
            },
            Plugin::ExtractCss {
                filename: filename("css", mode),
            },
            Plugin::Copy {
                patterns: vec![CopyPattern {
                    from: layout.static_path(),
                    to: layout.output_static_path(),
                }],
            },
        ];

        let rules = transform_rules(mode);

        debug!(
            mode = %mode,
            entries = entries.len(),
            rules = rules.len(),
            "assembled build configuration"
        );

        Self {
            mode,
            entries,
            output: OutputOptions {
                filename: filename("js", mode),
                path: output_path,
            },
            resolve: ResolveOptions {
                extensions: layout.extensions.clone(),
                aliases,
            },
            devtool,
            dev_server,
            plugins,
            optimization: optimization(mode),
            rules,
        }
    }

    /// First rule whose pattern matches `path`.
    pub fn rule_for(&self, path: &Path) -> Result<Option<&Rule>> {
        for rule in &self.rules {
            if rule.matches(path)? {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "build".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "build".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Project inputs the build reads: the application entry, HTML
    /// templates and copy sources.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        let mut sources: Vec<PathBuf> =
            self.entries.last().map(PathBuf::from).into_iter().collect();
        for plugin in &self.plugins {
            match plugin {
                Plugin::Html { template, .. } => sources.push(template.clone()),
                Plugin::Copy { patterns } => {
                    sources.extend(patterns.iter().map(|pattern| pattern.from.clone()))
                }
                Plugin::Clean | Plugin::ExtractCss { .. } => {}
            }
        }
        sources
    }

    /// Name of the stylesheet template carried by the extraction plugin.
    pub fn css_filename(&self) -> Option<&str> {
        self.plugins.iter().find_map(|plugin| match plugin {
            Plugin::ExtractCss { filename } => Some(filename.as_str()),
            _ => None,
        })
    }
}
