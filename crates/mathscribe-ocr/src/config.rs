//! Configuration for the recognition engine.

use std::path::PathBuf;

use mathscribe_core::{DeviceType, ModelSource};
use serde::{Deserialize, Serialize};

/// Configuration for the recognition engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Where to load the model weights from.
    pub model: ModelSource,

    /// Device to run inference on.
    pub device: DeviceType,

    /// Path to store downloaded models.
    pub cache_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    model: Option<ModelSource>,
    device: Option<DeviceType>,
    cache_dir: Option<PathBuf>,
}

impl EngineConfigBuilder {
    /// Sets the model from a user-supplied string (HuggingFace repo ID or
    /// local path).
    #[must_use]
    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(ModelSource::from_user_string(model));
        self
    }

    /// Sets the model source directly.
    #[must_use]
    pub fn model_source(mut self, source: ModelSource) -> Self {
        self.model = Some(source);
        self
    }

    /// Sets the device.
    #[must_use]
    pub fn device(mut self, device: DeviceType) -> Self {
        self.device = Some(device);
        self
    }

    /// Sets to use CUDA with the specified device ordinal.
    #[must_use]
    pub fn cuda(mut self, device_id: usize) -> Self {
        self.device = Some(DeviceType::Cuda { device_id });
        self
    }

    /// Sets the cache directory.
    #[must_use]
    pub fn cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(path.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<EngineConfig, String> {
        let model = self.model.ok_or("model is required")?;

        Ok(EngineConfig {
            model,
            device: self.device.unwrap_or_default(),
            cache_dir: self.cache_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = EngineConfig::builder()
            .model("mathscribe/crnn-math-base")
            .build()
            .unwrap();
        assert!(matches!(config.model, ModelSource::HuggingFace { .. }));
        assert_eq!(config.device, DeviceType::Cpu);
    }

    #[test]
    fn test_builder_requires_model() {
        assert!(EngineConfig::builder().build().is_err());
    }
}
