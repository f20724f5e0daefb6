//! Output pipeline: runs the plugin steps that sit outside the bundling
//! engine (cleaning, HTML shell generation, static copying) in the order
//! the configuration lists them.

mod fs;
mod html;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::error::{ConfigError, Result};
use crate::steps::Plugin;

use html::ShellAssets;

/// Files produced by the bundling engine, relative to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
}

impl AssetManifest {
    pub fn new(scripts: Vec<String>, styles: Vec<String>) -> Self {
        Self { scripts, styles }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitReport {
    /// Files written, in emission order
    pub written: Vec<PathBuf>,
    /// Steps left to the bundling engine
    pub skipped: Vec<&'static str>,
}

pub struct OutputPipeline<'a> {
    config: &'a BuildConfig,
    title: Option<String>,
}

impl<'a> OutputPipeline<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self {
            config,
            title: None,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Run every output step in order.
    ///
    /// Refuses to start when the output directory overlaps a source the
    /// steps read, since `Clean` would delete it.
    pub fn run(&self, manifest: &AssetManifest) -> Result<EmitReport> {
        let out_dir = &self.config.output.path;
        let mut report = EmitReport::default();

        fs::ensure_disjoint(out_dir, &self.config.source_paths())?;

        for plugin in &self.config.plugins {
            debug!(plugin = plugin.name(), "running output step");

            match plugin {
                Plugin::Clean => fs::clean_output_dir(out_dir)?,
                Plugin::Html {
                    template,
                    filename,
                    minify,
                } => {
                    let source = std::fs::read_to_string(template).map_err(|err| {
                        if err.kind() == std::io::ErrorKind::NotFound {
                            ConfigError::TemplateNotFound {
                                path: template.clone(),
                            }
                        } else {
                            err.into()
                        }
                    })?;
                    let assets = ShellAssets {
                        title: self.title.as_deref(),
                        mode: self.config.mode,
                        scripts: &manifest.scripts,
                        styles: &manifest.styles,
                    };
                    let html =
                        html::render_shell(&source, template, &assets, minify.collapse_whitespace)?;

                    let target = out_dir.join(filename);
                    std::fs::create_dir_all(out_dir)?;
                    std::fs::write(&target, html)?;
                    report.written.push(target);
                }
                Plugin::ExtractCss { .. } => report.skipped.push(plugin.name()),
                Plugin::Copy { patterns } => {
                    for pattern in patterns {
                        let copied = fs::copy_dir(&pattern.from, &pattern.to)?;
                        debug!(
                            from = %pattern.from.display(),
                            files = copied.len(),
                            "copied static assets"
                        );
                        report.written.extend(copied);
                    }
                }
            }
        }

        info!(
            files = report.written.len(),
            out_dir = %out_dir.display(),
            "emitted output"
        );
        Ok(report)
    }
}
