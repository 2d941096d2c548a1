//! Model source and device descriptors for the recognition engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source location for recognizer weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSource {
    /// HuggingFace Hub model.
    HuggingFace {
        /// Repository ID (e.g., "mathscribe/crnn-math-base").
        repo_id: String,
        /// Optional revision (branch, tag, or commit).
        revision: Option<String>,
    },
    /// Local filesystem path to a model directory.
    LocalPath {
        /// Path to the directory holding the weight and vocabulary files.
        path: PathBuf,
    },
}

impl ModelSource {
    /// Creates a HuggingFace source.
    #[must_use]
    pub fn huggingface(repo_id: impl Into<String>) -> Self {
        Self::HuggingFace {
            repo_id: repo_id.into(),
            revision: None,
        }
    }

    /// Creates a local path source.
    #[must_use]
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::LocalPath { path: path.into() }
    }

    /// Parses a user-supplied model string.
    ///
    /// Strings containing a path separator or pointing at an existing
    /// directory are treated as local paths; everything else as a
    /// HuggingFace repository ID.
    #[must_use]
    pub fn from_user_string(s: &str) -> Self {
        let path = std::path::Path::new(s);
        if path.exists() || s.starts_with('.') || s.starts_with('/') {
            Self::local(path)
        } else {
            Self::huggingface(s)
        }
    }
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HuggingFace { repo_id, .. } => write!(f, "{repo_id}"),
            Self::LocalPath { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Compute device for inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceType {
    /// CPU inference.
    Cpu,
    /// CUDA GPU.
    Cuda {
        /// CUDA device ordinal.
        device_id: usize,
    },
    /// Apple Metal GPU.
    Metal {
        /// Metal device ordinal.
        device_id: usize,
    },
}

impl Default for DeviceType {
    fn default() -> Self {
        Self::Cpu
    }
}

/// Metadata about a loaded recognizer model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model identifier (repo ID or local path).
    pub id: String,
    /// Expected input height in pixels.
    pub input_height: usize,
    /// Expected input width in pixels.
    pub input_width: usize,
    /// Symbol vocabulary size (excluding the CTC blank).
    pub vocab_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user_string() {
        assert!(matches!(
            ModelSource::from_user_string("mathscribe/crnn-math-base"),
            ModelSource::HuggingFace { .. }
        ));
        assert!(matches!(
            ModelSource::from_user_string("./models"),
            ModelSource::LocalPath { .. }
        ));
        assert!(matches!(
            ModelSource::from_user_string("/opt/models/ocr"),
            ModelSource::LocalPath { .. }
        ));
    }
}
