//! # Mathscribe OCR
//!
//! The handwritten-math recognition engine: a pretrained CRNN over
//! candle, loaded once at process start and shared read-only across
//! requests.
//!
//! The pipeline is fixed: decode bitmap → grayscale → resize to 32×128 →
//! normalize → CRNN forward → greedy CTC collapse → symbol table decode.
//!
//! ## Example
//!
//! ```ignore
//! use mathscribe_ocr::{Engine, EngineConfig, Recognizer};
//!
//! let config = EngineConfig::builder()
//!     .model("mathscribe/crnn-math-base")
//!     .build()?;
//! let engine = Engine::new(config).await?;
//! let latex = engine.recognize(&image_bytes)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod loader;
pub mod model;
pub mod preprocess;
pub mod vocab;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::{Engine, Recognizer};
pub use loader::{ModelFiles, ModelLoader};
pub use model::{Crnn, CrnnConfig};
pub use vocab::{SymbolVocab, BLANK_ID};

// Re-exports from mathscribe-core
pub use mathscribe_core::{DeviceType, ModelMetadata, ModelSource};
