// src/error.rs
//! Error taxonomy.
//!
//! Configuration problems are fatal and typed; per-file problems are
//! diagnostics that ride alongside the results and never poison them.
//! Everything at the binary shell uses `anyhow` directly.

use serde::Serialize;
use thiserror::Error;

/// A configuration the engine refuses to start with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("threshold must be at least 1, got {0}")]
    ThresholdTooSmall(usize),

    #[error("to-threshold {to} is larger than from-threshold {from}")]
    ThresholdsInverted { from: usize, to: usize },

    #[error("tokenizer parallelism must be at least 1")]
    NoWorkers,
}

/// Why a file contributed nothing to the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum SkipReason {
    #[error("read failed: {0}")]
    Io(String),

    #[error("parse failed")]
    Parse,

    #[error("no grammar for this file type")]
    UnknownLanguage,
}

/// A file that was skipped, with the reason. Collected by the pipeline and
/// reported next to the clone groups.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: SkipReason,
}
