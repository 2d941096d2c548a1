//! Error types for the Mathscribe ecosystem.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the Mathscribe ecosystem.
///
/// The HTTP boundary maps these to exactly two status classes: missing
/// required input becomes a 400, everything else a 500 carrying the raw
/// underlying message.
#[derive(Error, Debug)]
pub enum Error {
    /// A required request input was missing or empty.
    #[error("Missing '{field}' in request")]
    MissingInput {
        /// Name of the missing field.
        field: String,
    },

    /// The uploaded bytes could not be decoded as a bitmap.
    #[error("Image decode error: {message}")]
    ImageDecode {
        /// Error message.
        message: String,
    },

    /// Preprocessing (resize/normalize/tensor conversion) failed.
    #[error("Preprocess error: {message}")]
    Preprocess {
        /// Error message.
        message: String,
    },

    /// Model inference failed.
    #[error("Inference error: {message}")]
    Inference {
        /// Error message.
        message: String,
    },

    /// Model loading error.
    #[error("Failed to load model: {message}")]
    ModelLoad {
        /// Error message.
        message: String,
    },

    /// The equation string could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Error message.
        message: String,
    },

    /// The equation could not be solved.
    #[error("Solve error: {message}")]
    Solve {
        /// Error message.
        message: String,
    },

    /// A result could not be rendered to LaTeX.
    #[error("Render error: {message}")]
    Render {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Returns `true` if this error was caused by missing/empty user input.
    ///
    /// The boundary layer maps these to HTTP 400; all other variants map
    /// to HTTP 500.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }

    /// Creates a missing-input error for the given field.
    #[must_use]
    pub fn missing_input(field: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    /// Creates an image decode error.
    #[must_use]
    pub fn image_decode(message: impl Into<String>) -> Self {
        Self::ImageDecode {
            message: message.into(),
        }
    }

    /// Creates a preprocess error.
    #[must_use]
    pub fn preprocess(message: impl Into<String>) -> Self {
        Self::Preprocess {
            message: message.into(),
        }
    }

    /// Creates an inference error.
    #[must_use]
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    /// Creates a model load error.
    #[must_use]
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates a solve error.
    #[must_use]
    pub fn solve(message: impl Into<String>) -> Self {
        Self::Solve {
            message: message.into(),
        }
    }

    /// Creates a render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        assert!(Error::missing_input("image").is_user_error());
        assert!(!Error::parse("bad token").is_user_error());
        assert!(!Error::inference("shape mismatch").is_user_error());
        assert!(!Error::internal("oops").is_user_error());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::missing_input("equation");
        assert_eq!(err.to_string(), "Missing 'equation' in request");

        let err = Error::parse("unexpected character '='");
        assert_eq!(err.to_string(), "Parse error: unexpected character '='");
    }
}
