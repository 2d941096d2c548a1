//! Polynomial equation solving.
//!
//! The solver always returns a sequence of solution values, possibly
//! empty (identities and contradictory constant equations both yield no
//! roots to report, matching what a pass-through of the engine result
//! looks like). Degrees one and two are solved in closed form with exact
//! radicals; higher degrees are reduced by rational-root extraction and
//! deflation first.

use num_traits::{One, Zero};

use crate::error::{Result, SymbolicError};
use crate::expr::{Constant, Equation, Expr};
use crate::polynomial::Polynomial;
use crate::rational::Rational;
use crate::simplify::sqrt_parts;

/// Solves `equation` for `variable`.
///
/// Solutions are exact expressions: rational roots ascending first, then
/// the radical pair of an irreducible quadratic remainder (the `-√`
/// branch before the `+√` branch).
pub fn solve(equation: &Equation, variable: &str) -> Result<Vec<Expr>> {
    let residual = equation.residual();
    let Some(poly) = Polynomial::from_expr(&residual, variable) else {
        return Err(SymbolicError::unsolvable(format!(
            "equation is not polynomial in '{variable}'"
        )));
    };

    match poly.degree() {
        // 0 = 0 or c = 0: nothing to report either way.
        None | Some(0) => Ok(Vec::new()),
        Some(1) => {
            let root = -(poly.coeff(0) / poly.coeff(1));
            Ok(vec![Expr::Number(root)])
        }
        Some(2) => Ok(quadratic_roots(&poly)),
        Some(degree) => {
            let Some((rational, remainder)) = poly.rational_roots() else {
                return Err(SymbolicError::unsolvable(format!(
                    "cannot isolate roots of a degree {degree} polynomial with \
                     coefficients this large"
                )));
            };
            let mut out: Vec<Expr> = rational
                .iter()
                .map(|(root, _)| Expr::Number(root.clone()))
                .collect();
            match remainder.degree() {
                None | Some(0) => Ok(out),
                Some(1) => {
                    let root = -(remainder.coeff(0) / remainder.coeff(1));
                    out.push(Expr::Number(root));
                    Ok(out)
                }
                Some(2) => {
                    out.extend(quadratic_roots(&remainder));
                    Ok(out)
                }
                Some(left) => Err(SymbolicError::unsolvable(format!(
                    "no closed form found for the remaining degree {left} factor"
                ))),
            }
        }
    }
}

/// Closed-form roots of a degree-two polynomial, distinct values only.
fn quadratic_roots(poly: &Polynomial) -> Vec<Expr> {
    let a = poly.coeff(2);
    let b = poly.coeff(1);
    let c = poly.coeff(0);

    let two_a = Rational::from_int(2) * a.clone();
    let center = -(b.clone() / two_a.clone());
    let discriminant = b.clone() * b - Rational::from_int(4) * a * c;

    if discriminant.is_zero() {
        return vec![Expr::Number(center)];
    }

    let negative = discriminant.is_negative();
    let (mut coeff, radical) = sqrt_parts(&discriminant.abs());
    coeff = coeff / two_a;
    // The ± in the quadratic formula absorbs the sign of 1/(2a).
    coeff = coeff.abs();

    match (radical, negative) {
        (None, false) => {
            // Rational roots, ascending.
            let mut roots = [
                center.clone() - coeff.clone(),
                center + coeff,
            ];
            roots.sort();
            roots.into_iter().map(Expr::Number).collect()
        }
        (radical, imaginary) => {
            let offset = radical_offset(coeff, radical, imaginary);
            vec![
                root_expr(&center, &offset, true),
                root_expr(&center, &offset, false),
            ]
        }
    }
}

/// Builds the `coeff * [i] * [sqrt(d)]` offset term.
fn radical_offset(coeff: Rational, radical: Option<Expr>, imaginary: bool) -> Expr {
    let mut factors = Vec::new();
    if !coeff.is_one() {
        factors.push(Expr::Number(coeff));
    }
    if imaginary {
        factors.push(Expr::Constant(Constant::I));
    }
    if let Some(radical) = radical {
        factors.push(radical);
    }
    Expr::mul(factors)
}

fn root_expr(center: &Rational, offset: &Expr, minus: bool) -> Expr {
    let offset = if minus {
        Expr::neg(offset.clone())
    } else {
        offset.clone()
    };
    if center.is_zero() {
        offset
    } else {
        Expr::add(vec![Expr::Number(center.clone()), offset])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::render;
    use crate::parser::parse_expr;

    fn solve_src(src: &str) -> Result<Vec<String>> {
        let (lhs, rhs) = match src.split_once('=') {
            Some((l, r)) => (
                parse_expr(l, "x")?,
                parse_expr(r, "x")?,
            ),
            None => (parse_expr(src, "x")?, Expr::int(0)),
        };
        let equation = Equation::new(lhs, rhs);
        Ok(solve(&equation, "x")?.iter().map(render).collect())
    }

    #[test]
    fn test_quadratic_rational_roots() {
        let roots = solve_src("2x**2+3x-5=0").unwrap();
        assert_eq!(roots, vec![r"-\frac{5}{2}", "1"]);
    }

    #[test]
    fn test_linear_implied_zero() {
        let roots = solve_src("x+1").unwrap();
        assert_eq!(roots, vec!["-1"]);
    }

    #[test]
    fn test_identity_has_no_reported_roots() {
        assert_eq!(solve_src("x-x").unwrap(), Vec::<String>::new());
        assert_eq!(solve_src("5").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_double_root_reported_once() {
        let roots = solve_src("x**2-2x+1=0").unwrap();
        assert_eq!(roots, vec!["1"]);
    }

    #[test]
    fn test_irrational_roots() {
        let roots = solve_src("x**2-2=0").unwrap();
        assert_eq!(roots, vec![r"-\sqrt{2}", r"\sqrt{2}"]);
    }

    #[test]
    fn test_complex_roots() {
        let roots = solve_src("x**2+1=0").unwrap();
        assert_eq!(roots, vec![r"-i", r"i"]);
    }

    #[test]
    fn test_shifted_radical_roots() {
        // x^2 - 2x - 1 = 0 -> 1 ± sqrt(2)
        let roots = solve_src("x**2-2x-1=0").unwrap();
        assert_eq!(roots, vec![r"1 - \sqrt{2}", r"1 + \sqrt{2}"]);
    }

    #[test]
    fn test_cubic_with_rational_roots() {
        // (x-1)(x+2)(x-3) = x^3 - 2x^2 - 5x + 6
        let roots = solve_src("x**3-2x**2-5x+6=0").unwrap();
        assert_eq!(roots, vec!["-2", "1", "3"]);
    }

    #[test]
    fn test_cubic_reducing_to_quadratic() {
        // x^3 - 2x = x(x^2 - 2)
        let roots = solve_src("x**3-2x=0").unwrap();
        assert_eq!(roots, vec!["0", r"-\sqrt{2}", r"\sqrt{2}"]);
    }

    #[test]
    fn test_non_polynomial_rejected() {
        let err = solve_src("sin(x)").unwrap_err();
        assert!(matches!(err, SymbolicError::Unsolvable(_)));
    }

    #[test]
    fn test_mixed_sides() {
        // x^2 = 4 -> ±2
        let roots = solve_src("x**2=4").unwrap();
        assert_eq!(roots, vec!["-2", "2"]);
    }
}
