//! Chunk splitting and minimization policy.

use serde::{Deserialize, Serialize};

use crate::mode::BuildMode;
use crate::steps::Minimizer;

/// Which chunks the engine may split shared modules out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
    #[default]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitChunks {
    pub chunks: ChunkScope,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationPolicy {
    pub split_chunks: SplitChunks,
    pub minimize: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minimizers: Vec<Minimizer>,
}

/// Chunk splitting across all chunks, plus Terser minimization in production.
pub fn optimization(mode: BuildMode) -> OptimizationPolicy {
    let mut policy = OptimizationPolicy {
        split_chunks: SplitChunks {
            chunks: ChunkScope::All,
        },
        minimize: false,
        minimizers: Vec::new(),
    };

    if mode.is_production() {
        policy.minimize = true;
        policy.minimizers = vec![Minimizer::Terser];
    }

    policy
}
