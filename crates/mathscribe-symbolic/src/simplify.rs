//! Expression simplification.
//!
//! Polynomial expressions are canonicalized through the dense polynomial
//! representation (expand, collect, descending-degree terms). Everything
//! else goes through local bottom-up rewrites: constant folding, identity
//! elements, double negation, and perfect-square roots.

use dashu::integer::IBig;
use num_traits::{One, Zero};

use crate::expr::{Expr, Func};
use crate::polynomial::Polynomial;
use crate::rational::Rational;

/// Square-free extraction gives up beyond this radicand.
const MAX_RADICAND: i128 = 1_000_000_000_000;

/// Simplifies an expression with respect to the bound variable.
#[must_use]
pub fn simplify(expr: &Expr, variable: &str) -> Expr {
    if let Some(poly) = Polynomial::from_expr(expr, variable) {
        return poly.to_expr(variable);
    }
    rewrite(expr)
}

/// One bottom-up rewrite pass.
fn rewrite(expr: &Expr) -> Expr {
    match expr {
        Expr::Number(_) | Expr::Symbol(_) | Expr::Constant(_) => expr.clone(),

        Expr::Add(terms) => {
            let mut numeric = Rational::zero();
            let mut rest = Vec::new();
            for term in flatten_add(terms) {
                match term {
                    Expr::Number(r) => numeric = numeric + r,
                    other => rest.push(other),
                }
            }
            if !numeric.is_zero() || rest.is_empty() {
                rest.push(Expr::Number(numeric));
            }
            Expr::add(rest)
        }

        Expr::Mul(factors) => {
            let mut numeric = Rational::one();
            let mut rest = Vec::new();
            for factor in flatten_mul(factors) {
                match factor {
                    Expr::Number(r) => numeric = numeric * r,
                    other => rest.push(other),
                }
            }
            if numeric.is_zero() {
                return Expr::int(0);
            }
            if !numeric.is_one() || rest.is_empty() {
                rest.insert(0, Expr::Number(numeric));
            }
            Expr::mul(rest)
        }

        Expr::Neg(inner) => match rewrite(inner) {
            Expr::Number(r) => Expr::Number(-r),
            Expr::Neg(deep) => *deep,
            other => Expr::neg(other),
        },

        Expr::Div { num, den } => {
            let num = rewrite(num);
            let den = rewrite(den);
            if den.is_one() {
                return num;
            }
            if num.is_zero() && !den.is_zero() {
                return Expr::int(0);
            }
            if let (Some(a), Some(b)) = (num.as_number(), den.as_number()) {
                if let Some(inv) = b.recip() {
                    return Expr::Number(a * &inv);
                }
            }
            Expr::div(num, den)
        }

        Expr::Pow { base, exp } => {
            let base = rewrite(base);
            let exp = rewrite(exp);
            if exp.is_zero() {
                return Expr::int(1);
            }
            if exp.is_one() {
                return base;
            }
            if base.is_one() {
                return Expr::int(1);
            }
            if let (Some(b), Some(e)) = (base.as_number(), exp.as_number()) {
                if let Some(k) = e.to_i64() {
                    if let Some(folded) = b.pow(k) {
                        return Expr::Number(folded);
                    }
                }
            }
            Expr::pow(base, exp)
        }

        Expr::Function { func, arg } => {
            let arg = rewrite(arg);
            if *func == Func::Sqrt {
                if let Some(r) = arg.as_number() {
                    if !r.is_negative() {
                        return sqrt_of_rational(r);
                    }
                }
            }
            Expr::func(*func, arg)
        }
    }
}

fn flatten_add(terms: &[Expr]) -> Vec<Expr> {
    let mut out = Vec::new();
    for term in terms {
        match rewrite(term) {
            Expr::Add(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    out
}

fn flatten_mul(factors: &[Expr]) -> Vec<Expr> {
    let mut out = Vec::new();
    for factor in factors {
        match rewrite(factor) {
            Expr::Mul(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    out
}

/// Splits `sqrt(r)` for non-negative `r` into a rational coefficient and
/// an optional square-free radical: `value = coeff * radical`.
#[must_use]
pub fn sqrt_parts(r: &Rational) -> (Rational, Option<Expr>) {
    if r.is_zero() {
        return (Rational::zero(), None);
    }
    // sqrt(n/d) = sqrt(n*d)/d
    let den = r.denominator();
    let radicand = Rational::new(r.numerator() * den.clone(), IBig::from(1i64));
    let Some(m) = radicand.to_i128() else {
        return (Rational::one(), Some(Expr::func(Func::Sqrt, Expr::Number(r.clone()))));
    };
    if m > MAX_RADICAND {
        return (Rational::one(), Some(Expr::func(Func::Sqrt, Expr::Number(r.clone()))));
    }

    let (mut square, mut free) = (1i128, m);
    let mut d = 2i128;
    while d * d <= free {
        while free % (d * d) == 0 {
            free /= d * d;
            square *= d;
        }
        d += 1;
    }

    let coeff = Rational::new(square.into(), den);
    if free == 1 {
        (coeff, None)
    } else {
        (
            coeff,
            Some(Expr::func(Func::Sqrt, Expr::int(free as i64))),
        )
    }
}

/// The exact square root of a non-negative rational as an expression:
/// a plain number for perfect squares, otherwise `coeff * sqrt(free)`.
#[must_use]
pub fn sqrt_of_rational(r: &Rational) -> Expr {
    let (coeff, radical) = sqrt_parts(r);
    match radical {
        None => Expr::Number(coeff),
        Some(radical) if coeff.is_one() => radical,
        Some(radical) => Expr::Mul(vec![Expr::Number(coeff), radical]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn simp(src: &str) -> Expr {
        simplify(&parse_expr(src, "x").unwrap(), "x")
    }

    #[test]
    fn test_polynomial_canonicalization() {
        // (x+1)(x-1) -> x^2 - 1
        let expr = simp("(x+1)(x-1)");
        assert_eq!(
            expr,
            Expr::Add(vec![
                Expr::pow(Expr::symbol("x"), Expr::int(2)),
                Expr::Number(Rational::from_int(-1)),
            ])
        );
    }

    #[test]
    fn test_like_terms_collect() {
        let expr = simp("x + x + 1 + 2");
        assert_eq!(
            expr,
            Expr::Add(vec![
                Expr::Mul(vec![Expr::int(2), Expr::symbol("x")]),
                Expr::Number(Rational::from_int(3)),
            ])
        );
    }

    #[test]
    fn test_non_polynomial_constant_folding() {
        // 2*3*sin(x) -> 6 sin(x)
        let expr = simp("2*3*sin(x)");
        assert_eq!(
            expr,
            Expr::Mul(vec![
                Expr::int(6),
                Expr::func(Func::Sin, Expr::symbol("x")),
            ])
        );
    }

    #[test]
    fn test_sqrt_perfect_square() {
        assert_eq!(simp("sqrt(9)"), Expr::int(3));
    }

    #[test]
    fn test_sqrt_square_extraction() {
        let (coeff, radical) = sqrt_parts(&Rational::from_int(8));
        assert_eq!(coeff, Rational::from_int(2));
        assert_eq!(
            radical,
            Some(Expr::func(Func::Sqrt, Expr::int(2)))
        );

        let (coeff, radical) = sqrt_parts(&Rational::from_i64(49, 4));
        assert_eq!(coeff, Rational::from_i64(7, 2));
        assert!(radical.is_none());
    }
}
