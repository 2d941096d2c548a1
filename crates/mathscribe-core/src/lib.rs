//! # Mathscribe Core
//!
//! Core types shared across the Mathscribe ecosystem.
//!
//! This crate provides the foundational abstractions used by the other
//! components:
//! - The unified error type and `Result` alias
//! - Request/response payloads for the HTTP surface
//! - Model source and device descriptors for the recognition engine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model;
pub mod request;
pub mod response;

pub use error::{Error, Result};
pub use model::{DeviceType, ModelMetadata, ModelSource};
pub use request::{SolveRequest, DEFAULT_VARIABLE};
pub use response::{HealthResponse, RecognizeResponse, SolveResponse};
