//! Request payloads for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Variable name used when the request does not name one.
pub const DEFAULT_VARIABLE: &str = "x";

/// Request body for the `/solve` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    /// The equation string, e.g. `"2x^2+3x-5=0"`. May omit the `=` side,
    /// in which case the expression is solved against zero.
    pub equation: String,

    /// Variable to solve for. Defaults to `"x"` when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

impl SolveRequest {
    /// Creates a request for the given equation with the default variable.
    #[must_use]
    pub fn new(equation: impl Into<String>) -> Self {
        Self {
            equation: equation.into(),
            variable: None,
        }
    }

    /// Sets the variable to solve for.
    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// The equation with surrounding whitespace removed.
    #[must_use]
    pub fn equation_trimmed(&self) -> &str {
        self.equation.trim()
    }

    /// The variable to solve for: the trimmed request value, or
    /// [`DEFAULT_VARIABLE`] when the field is absent or empty.
    #[must_use]
    pub fn variable_or_default(&self) -> &str {
        match self.variable.as_deref() {
            None | Some("") => DEFAULT_VARIABLE,
            Some(v) => v.trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_defaulting() {
        let req = SolveRequest::new("x+1");
        assert_eq!(req.variable_or_default(), "x");

        let req = SolveRequest::new("t+1").with_variable("");
        assert_eq!(req.variable_or_default(), "x");

        let req = SolveRequest::new("t+1").with_variable(" t ");
        assert_eq!(req.variable_or_default(), "t");
    }

    #[test]
    fn test_deserialize_without_variable() {
        let req: SolveRequest = serde_json::from_str(r#"{"equation":"x+1"}"#).unwrap();
        assert_eq!(req.equation, "x+1");
        assert!(req.variable.is_none());
    }
}
