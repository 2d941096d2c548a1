//! The equation adapter.
//!
//! A thin, stateless bridge between the HTTP payloads and the symbolic
//! engine: caret-to-power rewrite, first-`=` split, solve, and the three
//! derived forms, everything rendered to LaTeX. Each call is a pure
//! function of the request; identical requests produce identical
//! responses.

use mathscribe_core::{Error, Result, SolveRequest, SolveResponse};
use mathscribe_symbolic::{
    differentiate, factor, latex, parse_expr, simplify, solve, Equation, SymbolicError,
};

/// Runs the full solve pipeline for one request.
///
/// # Errors
///
/// Returns a missing-input error for an empty equation (mapped to 400 at
/// the boundary) and parse/solve/render errors for everything else
/// (mapped to 500).
pub fn solve_equation(request: &SolveRequest) -> Result<SolveResponse> {
    let input = request.equation_trimmed();
    if input.is_empty() {
        return Err(Error::missing_input("equation"));
    }
    let variable = request.variable_or_default();

    // Literal, context-insensitive rewrite of the caret exponent marker
    // into the power operator, applied to the whole string before any
    // parsing.
    let normalized = input.replace('^', "**");

    // Split on the FIRST '=' only; the right side keeps any further '='
    // and fails in the parser with a descriptive message.
    let equation = match normalized.split_once('=') {
        Some((lhs, rhs)) => Equation::new(
            parse_expr(lhs, variable).map_err(map_symbolic)?,
            parse_expr(rhs, variable).map_err(map_symbolic)?,
        ),
        None => Equation::against_zero(
            parse_expr(&normalized, variable).map_err(map_symbolic)?,
        ),
    };

    let residual = equation.residual();

    let solutions = solve(&equation, variable).map_err(map_symbolic)?;
    let solutions_latex = solutions.iter().map(latex::render).collect();

    let simplified = simplify(&residual, variable);
    let factored = factor(&residual, variable);
    let derivative = differentiate(&residual, variable).map_err(map_symbolic)?;

    Ok(SolveResponse {
        input_equation: input.to_string(),
        equation_latex: latex::render_equation(&equation),
        solutions_latex,
        simplified_latex: latex::render(&simplified),
        factored_latex: latex::render(&factored),
        derivative_latex: latex::render(&derivative),
        variable: variable.to_string(),
    })
}

/// Collapses engine errors into the boundary taxonomy: parse-class
/// errors keep their kind, everything else is a solve failure. The
/// underlying message is preserved verbatim either way.
fn map_symbolic(err: SymbolicError) -> Error {
    match err {
        SymbolicError::Parse(_) | SymbolicError::UnknownSymbol(_) => {
            Error::parse(err.to_string())
        }
        SymbolicError::Unsolvable(_) | SymbolicError::Unsupported(_) => {
            Error::solve(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_end_to_end() {
        let response =
            solve_equation(&SolveRequest::new("2x^2+3x-5=0")).unwrap();
        assert_eq!(response.input_equation, "2x^2+3x-5=0");
        assert_eq!(response.equation_latex, r"2 x^{2} + 3 x - 5 = 0");
        assert_eq!(response.solutions_latex, vec![r"-\frac{5}{2}", "1"]);
        assert_eq!(response.simplified_latex, r"2 x^{2} + 3 x - 5");
        assert_eq!(
            response.factored_latex,
            r"\left(x - 1\right) \left(2 x + 5\right)"
        );
        assert_eq!(response.derivative_latex, r"4 x + 3");
        assert_eq!(response.variable, "x");
    }

    #[test]
    fn test_implied_zero_equation() {
        let response = solve_equation(&SolveRequest::new("x+1")).unwrap();
        assert_eq!(response.equation_latex, r"x + 1 = 0");
        assert_eq!(response.solutions_latex, vec!["-1"]);
    }

    #[test]
    fn test_every_caret_rewritten() {
        // Both carets become powers; x^2 * x^3 simplifies to x^5.
        let response = solve_equation(&SolveRequest::new("x^2*x^3")).unwrap();
        assert_eq!(response.simplified_latex, r"x^{5}");
    }

    #[test]
    fn test_empty_equation_is_missing_input() {
        let err = solve_equation(&SolveRequest::new("   ")).unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn test_split_on_first_equals_only() {
        let err = solve_equation(&SolveRequest::new("x=1=2")).unwrap_err();
        assert!(!err.is_user_error());
        assert!(
            err.to_string().contains("unexpected character '='"),
            "unexpected message: {err}"
        );
    }

    #[test]
    fn test_alternate_variable() {
        let response = solve_equation(
            &SolveRequest::new("t^2-4=0").with_variable("t"),
        )
        .unwrap();
        assert_eq!(response.solutions_latex, vec!["-2", "2"]);
        assert_eq!(response.variable, "t");
    }

    #[test]
    fn test_idempotent_responses() {
        let request = SolveRequest::new("2x^2+3x-5=0");
        let first = solve_equation(&request).unwrap();
        let second = solve_equation(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_symbol_surfaces_as_parse_error() {
        let err = solve_equation(&SolveRequest::new("x+w=0")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
