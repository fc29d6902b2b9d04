use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Comment verbosity requested for a batch
///
/// Chosen once per invocation and applied uniformly to every task;
/// there is no per-file override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// Minimal comments, only top-level declarations
    Basic,
    /// More explanatory comments, still concise
    Advanced,
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self::Basic
    }
}

impl std::fmt::Display for CommentStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// One unit of annotation work, immutable once created
#[derive(Debug, Clone)]
pub struct FileTask {
    pub path: PathBuf,
    pub language_hint: String,
    pub style: CommentStyle,
}

impl FileTask {
    /// Create a task for a file, deriving the language hint from its
    /// extension
    pub fn new(path: PathBuf, style: CommentStyle) -> Self {
        let language_hint = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("text")
            .to_string();

        Self {
            path,
            language_hint,
            style,
        }
    }
}
