//! Weight resolution with HuggingFace Hub integration.

use std::path::{Path, PathBuf};

use hf_hub::api::sync::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};
use mathscribe_core::{Error, ModelSource, Result};
use tracing::{debug, info};

/// Name of the weight file inside a model directory or repository.
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// Name of the optional symbol vocabulary file.
pub const VOCAB_FILE: &str = "vocab.json";

/// Local paths for all files of a resolved model.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// The safetensors weight file.
    pub weights: PathBuf,
    /// Optional symbol vocabulary override.
    pub vocab: Option<PathBuf>,
}

/// Resolves model sources to local files, downloading when needed.
pub struct ModelLoader {
    api: Api,
}

impl ModelLoader {
    /// Creates a new model loader, downloading into `cache_dir` (or the
    /// default cache when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HuggingFace API cannot be initialized.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.unwrap_or_else(Self::default_cache_dir);
        let api = ApiBuilder::new()
            .with_cache_dir(cache_dir)
            .build()
            .map_err(|e| Error::ModelLoad {
                message: format!("Failed to initialize HuggingFace API: {e}"),
            })?;
        Ok(Self { api })
    }

    /// The default cache directory for downloaded models.
    #[must_use]
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mathscribe")
            .join("models")
    }

    /// Resolves a model source to local paths for all required files.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be resolved or downloaded.
    pub fn resolve(&self, source: &ModelSource) -> Result<ModelFiles> {
        match source {
            ModelSource::HuggingFace { repo_id, revision } => {
                self.resolve_huggingface(repo_id, revision.as_deref())
            }
            ModelSource::LocalPath { path } => Self::resolve_local(path),
        }
    }

    fn resolve_huggingface(
        &self,
        repo_id: &str,
        revision: Option<&str>,
    ) -> Result<ModelFiles> {
        info!(repo_id, revision, "Resolving HuggingFace model");

        let repo = self.api.repo(Repo::with_revision(
            repo_id.to_string(),
            RepoType::Model,
            revision.unwrap_or("main").to_string(),
        ));

        let weights = repo.get(WEIGHTS_FILE).map_err(|e| Error::ModelLoad {
            message: format!("Failed to download {WEIGHTS_FILE}: {e}"),
        })?;
        debug!(?weights, "Downloaded weights");

        let vocab = repo.get(VOCAB_FILE).ok();
        if vocab.is_none() {
            debug!("No {VOCAB_FILE} in repository, using the built-in table");
        }

        Ok(ModelFiles { weights, vocab })
    }

    fn resolve_local(path: &Path) -> Result<ModelFiles> {
        info!(path = %path.display(), "Resolving local model");

        let weights = if path.is_dir() {
            path.join(WEIGHTS_FILE)
        } else {
            path.to_path_buf()
        };
        if !weights.exists() {
            return Err(Error::ModelLoad {
                message: format!("No weight file at {}", weights.display()),
            });
        }

        let vocab = weights
            .parent()
            .map(|dir| dir.join(VOCAB_FILE))
            .filter(|p| p.exists());

        Ok(ModelFiles { weights, vocab })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_local_missing() {
        let err = ModelLoader::resolve_local(Path::new("/nonexistent/model-dir"))
            .unwrap_err();
        assert!(matches!(err, Error::ModelLoad { .. }));
    }

    #[test]
    fn test_default_cache_dir_suffix() {
        let dir = ModelLoader::default_cache_dir();
        assert!(dir.ends_with("mathscribe/models"));
    }
}
