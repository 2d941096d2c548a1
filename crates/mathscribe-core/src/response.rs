//! Response payloads for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Response body for a successful `/predict` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeResponse {
    /// The recognized expression as a LaTeX-like string.
    pub latex: String,
}

/// Response body for a successful `/solve` call.
///
/// Every field is an independently computed projection of the parsed input;
/// nothing is cached or shared across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// The equation exactly as received (trimmed).
    pub input_equation: String,

    /// The parsed equation rendered to LaTeX.
    pub equation_latex: String,

    /// Solution values rendered to LaTeX, in solver order.
    pub solutions_latex: Vec<String>,

    /// Simplified form of the expression of interest.
    pub simplified_latex: String,

    /// Factored form of the expression of interest.
    pub factored_latex: String,

    /// Derivative of the expression of interest.
    pub derivative_latex: String,

    /// The variable the equation was solved for.
    pub variable: String,
}

/// Response body for `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is running.
    pub status: String,
}

impl HealthResponse {
    /// The canonical healthy response.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
