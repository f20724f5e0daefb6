//! Typed configuration for a front-end asset pipeline.
//!
//! [`BuildConfig::assemble`] turns a [`BuildMode`] and a [`ProjectLayout`]
//! into the full description a bundling engine consumes: entries, output
//! naming, resolution, source maps, dev server, output plugins,
//! optimization and per-file-type rules. [`OutputPipeline`] runs the
//! plugin steps that do not need the engine.

pub mod config;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod mode;
pub mod naming;
pub mod optimization;
pub mod output;
pub mod rules;
pub mod steps;
pub mod styles;
pub mod validation;

mod helpers;

// Re-export main types
pub use config::*;
pub use error::*;
pub use layout::ProjectLayout;
pub use mode::{BuildMode, MODE_ENV_VAR};
pub use naming::{filename, has_hash_segment};
pub use optimization::{optimization, ChunkScope, OptimizationPolicy, SplitChunks};
pub use output::{AssetManifest, EmitReport, OutputPipeline};
pub use rules::{transform_rules, AssetKind, Rule};
pub use steps::{CopyPattern, HtmlMinify, Loader, Minimizer, Plugin};
pub use styles::css_loaders;

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, CONFIG_FILE, ENV_PREFIX};
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
