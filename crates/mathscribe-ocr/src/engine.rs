//! The recognition engine.

use candle_core::{DType, Device, Tensor, D};
use candle_nn::VarBuilder;
use mathscribe_core::{DeviceType, Error, ModelMetadata, Result};

use crate::config::EngineConfig;
use crate::loader::ModelLoader;
use crate::model::{Crnn, CrnnConfig};
use crate::preprocess::{self, INPUT_HEIGHT, INPUT_WIDTH};
use crate::vocab::SymbolVocab;

/// Trait defining the recognizer interface.
///
/// Implementations are shared read-only across requests; `recognize` is
/// a pure, blocking call with no internal suspension points.
pub trait Recognizer: Send + Sync {
    /// Recognizes the math expression in an uploaded bitmap, returning
    /// its textual (LaTeX-like) representation.
    fn recognize(&self, image_bytes: &[u8]) -> Result<String>;

    /// Metadata about the loaded model.
    fn metadata(&self) -> &ModelMetadata;
}

/// The CRNN-backed recognition engine.
///
/// Constructed once at startup; the weights are never mutated afterwards,
/// so a shared reference is safe across concurrent requests.
pub struct Engine {
    model: Crnn,
    vocab: SymbolVocab,
    device: Device,
    metadata: ModelMetadata,
}

impl Engine {
    /// Creates a new engine with the given configuration, resolving and
    /// loading the model weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be resolved or loaded.
    pub async fn new(config: EngineConfig) -> Result<Self> {
        tracing::info!(model = %config.model, "Initializing recognition engine");

        let device = Self::select_device(&config)?;
        tracing::info!(device = ?device, "Using compute device");

        let loader = ModelLoader::new(config.cache_dir.clone())?;
        let files = loader.resolve(&config.model)?;

        let vocab = match &files.vocab {
            Some(path) => SymbolVocab::from_file(path)?,
            None => SymbolVocab::default_table(),
        };

        let data = std::fs::read(&files.weights).map_err(|e| Error::ModelLoad {
            message: format!("Failed to read weights: {e}"),
        })?;
        let vb = VarBuilder::from_buffered_safetensors(data, DType::F32, &device)
            .map_err(|e| Error::ModelLoad {
                message: format!("Failed to load safetensors: {e}"),
            })?;

        let crnn_config = CrnnConfig::with_classes(vocab.len());
        let model = Crnn::load(&crnn_config, vb).map_err(|e| Error::ModelLoad {
            message: format!("Failed to build CRNN: {e}"),
        })?;

        let metadata = ModelMetadata {
            id: config.model.to_string(),
            input_height: INPUT_HEIGHT as usize,
            input_width: INPUT_WIDTH as usize,
            vocab_size: vocab.len() - 1,
        };

        tracing::info!(
            model = %metadata.id,
            classes = vocab.len(),
            "Recognition engine ready"
        );

        Ok(Self {
            model,
            vocab,
            device,
            metadata,
        })
    }

    /// Selects the compute device based on configuration and what was
    /// compiled in.
    fn select_device(config: &EngineConfig) -> Result<Device> {
        match config.device {
            DeviceType::Cpu => Ok(Device::Cpu),
            DeviceType::Cuda { device_id: _device_id } => {
                #[cfg(feature = "cuda")]
                {
                    Device::new_cuda(_device_id).map_err(|e| Error::Inference {
                        message: format!("CUDA init failed: {e}"),
                    })
                }
                #[cfg(not(feature = "cuda"))]
                {
                    tracing::warn!("CUDA requested but not compiled in, falling back to CPU");
                    Ok(Device::Cpu)
                }
            }
            DeviceType::Metal { device_id: _device_id } => {
                #[cfg(feature = "metal")]
                {
                    Device::new_metal(_device_id).map_err(|e| Error::Inference {
                        message: format!("Metal init failed: {e}"),
                    })
                }
                #[cfg(not(feature = "metal"))]
                {
                    tracing::warn!("Metal requested but not compiled in, falling back to CPU");
                    Ok(Device::Cpu)
                }
            }
        }
    }

    /// Runs inference on a prepared input tensor, yielding the collapsed
    /// class id sequence.
    fn infer(&self, input: &Tensor) -> Result<Vec<u32>> {
        let logits = self
            .model
            .forward(input)
            .map_err(|e| Error::inference(e.to_string()))?;
        let classes = logits
            .argmax(D::Minus1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1::<u32>())
            .map_err(|e| Error::inference(e.to_string()))?;
        Ok(SymbolVocab::collapse(&classes))
    }
}

impl Recognizer for Engine {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String> {
        let image = preprocess::decode_image(image_bytes)?;
        let input = preprocess::image_to_tensor(&image, &self.device)?;
        let ids = self.infer(&input)?;
        self.vocab.decode(&ids)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
