//! Polynomial factorization over the rationals.
//!
//! Factors out rational roots as primitive integer linear factors
//! (`q*x - p` for a root `p/q`) and leaves whatever remains as a single
//! rational-root-free factor. Non-polynomial input falls back to plain
//! simplification, mirroring how a CAS returns such input unchanged.

use dashu::integer::IBig;
use num_traits::One;

use crate::expr::Expr;
use crate::polynomial::Polynomial;
use crate::rational::Rational;
use crate::simplify::simplify;

/// Factors an expression with respect to the bound variable.
#[must_use]
pub fn factor(expr: &Expr, variable: &str) -> Expr {
    let Some(poly) = Polynomial::from_expr(expr, variable) else {
        return simplify(expr, variable);
    };
    if poly.degree().map_or(true, |d| d == 0) {
        return poly.to_expr(variable);
    }
    let Some((roots, remainder)) = poly.rational_roots() else {
        return poly.to_expr(variable);
    };

    // poly = leading * prod (x - p/q)^m * monic_remainder
    let leading = poly
        .leading()
        .cloned()
        .unwrap_or_else(Rational::one);
    let mut constant = leading.clone();
    let mut factors: Vec<(Polynomial, usize)> = Vec::new();

    for (root, mult) in &roots {
        let p = root.numerator();
        let q = root.denominator();
        // (x - p/q) = (1/q)(q x - p)
        let linear = Polynomial::new(vec![
            Rational::new(-p, IBig::from(1i64)),
            Rational::new(q.clone(), IBig::from(1i64)),
        ]);
        let inv_q = Rational::new(IBig::from(1i64), q);
        if let Some(scaled) = inv_q.pow(*mult as i64) {
            constant = constant * scaled;
        }
        factors.push((linear, *mult));
    }

    match remainder.degree() {
        None | Some(0) => {}
        Some(_) => {
            // Deflation preserves the leading coefficient; strip it so the
            // residual factor is primitive with integer coefficients.
            let monic = remainder.scale(&leading.recip().unwrap_or_else(Rational::one));
            match monic.to_int_primitive() {
                Some((content, ints)) => {
                    constant = constant * content;
                    let residual = Polynomial::new(
                        ints.iter()
                            .map(|&c| Rational::from_int(c as i64))
                            .collect(),
                    );
                    factors.push((residual, 1));
                }
                None => factors.push((monic, 1)),
            }
        }
    }

    factors.sort_by(|a, b| factor_key(&a.0).cmp(&factor_key(&b.0)));

    let mut parts = Vec::new();
    if !constant.is_one() {
        parts.push(Expr::Number(constant));
    }
    for (poly, mult) in factors {
        let base = poly.to_expr(variable);
        if mult == 1 {
            parts.push(base);
        } else {
            parts.push(Expr::pow(base, Expr::int(mult as i64)));
        }
    }
    Expr::mul(parts)
}

/// Deterministic factor ordering: by degree, then ascending coefficients.
fn factor_key(poly: &Polynomial) -> (usize, Vec<Rational>) {
    let degree = poly.degree().unwrap_or(0);
    let coeffs = (0..=degree).map(|i| poly.coeff(i)).collect();
    (degree, coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::render;
    use crate::parser::parse_expr;

    fn factored(src: &str) -> String {
        render(&factor(&parse_expr(src, "x").unwrap(), "x"))
    }

    #[test]
    fn test_factor_quadratic() {
        // 2x^2 + 3x - 5 = (x - 1)(2x + 5)
        let out = factored("2x**2+3x-5");
        assert_eq!(out, r"\left(x - 1\right) \left(2 x + 5\right)");
    }

    #[test]
    fn test_factor_perfect_square() {
        let out = factored("x**2-2x+1");
        assert_eq!(out, r"\left(x - 1\right)^{2}");
    }

    #[test]
    fn test_factor_with_constant() {
        // 2x^2 - 2 = 2(x - 1)(x + 1)
        let out = factored("2x**2-2");
        assert_eq!(out, r"2 \left(x - 1\right) \left(x + 1\right)");
    }

    #[test]
    fn test_factor_irreducible() {
        // x^2 + 1 has no rational roots; stays as is.
        let out = factored("x**2+1");
        assert_eq!(out, r"x^{2} + 1");
    }

    #[test]
    fn test_factor_non_polynomial_passthrough() {
        let out = factored("sin(x)");
        assert_eq!(out, r"\sin\left(x\right)");
    }
}
