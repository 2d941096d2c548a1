//! Dense univariate polynomials over exact rationals.
//!
//! Coefficients are stored ascending by degree with no trailing zeros;
//! the zero polynomial has an empty coefficient vector.

use dashu::integer::IBig;
use num_traits::{One, Zero};

use crate::expr::Expr;
use crate::rational::Rational;

/// Coefficient magnitudes beyond this bound make rational-root candidate
/// enumeration too expensive; callers fall back to an unsolvable error.
const MAX_ROOT_SEARCH_COEFF: i128 = 1_000_000_000_000;

/// A dense univariate polynomial with rational coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<Rational>,
}

impl Polynomial {
    /// Creates a polynomial from ascending coefficients, trimming
    /// trailing zeros.
    #[must_use]
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().is_some_and(Rational::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(value: Rational) -> Self {
        Self::new(vec![value])
    }

    /// The monomial `coeff * x^degree`.
    #[must_use]
    pub fn monomial(coeff: Rational, degree: usize) -> Self {
        if coeff.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![Rational::zero(); degree + 1];
        coeffs[degree] = coeff;
        Self { coeffs }
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The degree, or `None` for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// The coefficient of `x^i` (zero beyond the degree).
    #[must_use]
    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or_else(Rational::zero)
    }

    /// The leading coefficient, or `None` for the zero polynomial.
    #[must_use]
    pub fn leading(&self) -> Option<&Rational> {
        self.coeffs.last()
    }

    /// Polynomial addition.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) + other.coeff(i)).collect();
        Self::new(coeffs)
    }

    /// Polynomial negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    /// Polynomial subtraction.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Polynomial multiplication (schoolbook; degrees here are tiny).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut coeffs =
            vec![Rational::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j].clone() + a * b;
            }
        }
        Self::new(coeffs)
    }

    /// Multiplies every coefficient by a scalar.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * factor).collect())
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        let mut result = Self::constant(Rational::one());
        for _ in 0..exp {
            result = result.mul(self);
        }
        result
    }

    /// The formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * &Rational::from_int(i as i64))
            .collect();
        Self::new(coeffs)
    }

    /// Evaluates at a rational point (Horner).
    #[must_use]
    pub fn eval(&self, at: &Rational) -> Rational {
        let mut acc = Rational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * at.clone() + c.clone();
        }
        acc
    }

    /// Divides by `(x - root)` assuming `root` is an exact root
    /// (synthetic division).
    #[must_use]
    pub fn deflate(&self, root: &Rational) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        let mut quotient = vec![Rational::zero(); self.coeffs.len() - 1];
        let mut carry = Rational::zero();
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if i == 0 {
                break;
            }
            carry = c + &(&carry * root);
            quotient[i - 1] = carry.clone();
        }
        Self::new(quotient)
    }

    /// Converts an expression tree to a polynomial in `variable`.
    ///
    /// Returns `None` when the expression is not polynomial: functions,
    /// constants such as `pi`, non-constant divisors, or non-integer /
    /// negative exponents.
    #[must_use]
    pub fn from_expr(expr: &Expr, variable: &str) -> Option<Self> {
        match expr {
            Expr::Number(r) => Some(Self::constant(r.clone())),
            Expr::Symbol(name) if name == variable => {
                Some(Self::monomial(Rational::one(), 1))
            }
            Expr::Symbol(_) | Expr::Constant(_) | Expr::Function { .. } => None,
            Expr::Add(terms) => {
                let mut acc = Self::zero();
                for term in terms {
                    acc = acc.add(&Self::from_expr(term, variable)?);
                }
                Some(acc)
            }
            Expr::Mul(factors) => {
                let mut acc = Self::constant(Rational::one());
                for factor in factors {
                    acc = acc.mul(&Self::from_expr(factor, variable)?);
                }
                Some(acc)
            }
            Expr::Neg(inner) => Some(Self::from_expr(inner, variable)?.neg()),
            Expr::Div { num, den } => {
                let den = Self::from_expr(den, variable)?;
                if den.degree() != Some(0) {
                    return None;
                }
                let inverse = den.coeff(0).recip()?;
                Some(Self::from_expr(num, variable)?.scale(&inverse))
            }
            Expr::Pow { base, exp } => {
                let exp = exp.as_number()?.to_i64()?;
                if !(0..=64).contains(&exp) {
                    return None;
                }
                Some(Self::from_expr(base, variable)?.pow(exp as u32))
            }
        }
    }

    /// Renders back to a canonical expression: terms in descending
    /// degree, unit coefficients folded away.
    #[must_use]
    pub fn to_expr(&self, variable: &str) -> Expr {
        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            terms.push(Self::term_expr(c, i, variable));
        }
        Expr::add(terms)
    }

    fn term_expr(coeff: &Rational, degree: usize, variable: &str) -> Expr {
        if degree == 0 {
            return Expr::Number(coeff.clone());
        }
        let power = if degree == 1 {
            Expr::symbol(variable)
        } else {
            Expr::pow(Expr::symbol(variable), Expr::int(degree as i64))
        };
        if coeff.is_one() {
            power
        } else if (-coeff).is_one() {
            Expr::neg(power)
        } else {
            Expr::Mul(vec![Expr::Number(coeff.clone()), power])
        }
    }

    /// Clears denominators and common numerator factors, returning the
    /// rational content and the primitive integer coefficients (leading
    /// coefficient positive).
    ///
    /// Returns `None` when a coefficient falls outside the root-search
    /// bound.
    #[must_use]
    pub fn to_int_primitive(&self) -> Option<(Rational, Vec<i128>)> {
        if self.is_zero() {
            return None;
        }
        let mut lcm: i128 = 1;
        for c in &self.coeffs {
            let den: i128 = c.denominator().try_into().ok()?;
            lcm = checked_lcm(lcm, den)?;
        }
        let scale = Rational::new(IBig::from(lcm), IBig::from(1i64));
        let mut ints = Vec::with_capacity(self.coeffs.len());
        for c in &self.coeffs {
            let v = (c * &scale).to_i128()?;
            if v.abs() > MAX_ROOT_SEARCH_COEFF {
                return None;
            }
            ints.push(v);
        }
        let mut g = 0i128;
        for &v in &ints {
            g = gcd_i128(g, v);
        }
        if *ints.last()? < 0 {
            g = -g;
        }
        for v in &mut ints {
            *v /= g;
        }
        // content * primitive == original
        let content = Rational::new(g.into(), lcm.into());
        Some((content, ints))
    }

    /// Extracts all rational roots with multiplicity by candidate testing
    /// and repeated deflation.
    ///
    /// Returns the roots sorted ascending and the (rational-root-free)
    /// remainder polynomial, or `None` when the coefficients are too
    /// large to enumerate divisor candidates.
    #[must_use]
    pub fn rational_roots(&self) -> Option<(Vec<(Rational, usize)>, Polynomial)> {
        if self.is_zero() {
            return None;
        }
        let mut work = self.clone();
        let mut roots: Vec<(Rational, usize)> = Vec::new();

        // x = 0 roots first.
        let mut zero_mult = 0usize;
        while work.degree() > Some(0) && work.coeff(0).is_zero() {
            work = work.deflate(&Rational::zero());
            zero_mult += 1;
        }
        if zero_mult > 0 {
            roots.push((Rational::zero(), zero_mult));
        }

        while work.degree() > Some(0) {
            let (_, ints) = work.to_int_primitive()?;
            let constant = *ints.first()?;
            let leading = *ints.last()?;
            let mut found = None;
            'search: for p in divisors(constant.abs()) {
                for q in divisors(leading.abs()) {
                    for candidate in [
                        Rational::new(p.into(), q.into()),
                        Rational::new((-p).into(), q.into()),
                    ] {
                        if work.eval(&candidate).is_zero() {
                            found = Some(candidate);
                            break 'search;
                        }
                    }
                }
            }
            let Some(root) = found else { break };
            let mut mult = 0usize;
            while work.eval(&root).is_zero() {
                work = work.deflate(&root);
                mult += 1;
            }
            roots.push((root, mult));
        }

        roots.sort_by(|a, b| a.0.cmp(&b.0));
        Some((roots, work))
    }
}

fn gcd_i128(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn checked_lcm(a: i128, b: i128) -> Option<i128> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd_i128(a, b)).checked_mul(b).map(i128::abs)
}

/// Positive divisors of `n` (trial division; callers bound `n`).
fn divisors(n: i128) -> Vec<i128> {
    if n == 0 {
        return vec![1];
    }
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            small.push(d);
            if d * d != n {
                large.push(n / d);
            }
        }
        d += 1;
    }
    large.reverse();
    small.extend(large);
    small
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::new(coeffs.iter().map(|&c| Rational::from_int(c)).collect())
    }

    #[test]
    fn test_degree_and_trim() {
        assert_eq!(poly(&[1, 2, 0]).degree(), Some(1));
        assert_eq!(poly(&[]).degree(), None);
        assert!(poly(&[0, 0]).is_zero());
    }

    #[test]
    fn test_mul() {
        // (x - 1)(2x + 5) = 2x^2 + 3x - 5
        let product = poly(&[-1, 1]).mul(&poly(&[5, 2]));
        assert_eq!(product, poly(&[-5, 3, 2]));
    }

    #[test]
    fn test_eval_and_deflate() {
        let p = poly(&[-5, 3, 2]);
        assert!(p.eval(&Rational::from_int(1)).is_zero());
        assert_eq!(p.deflate(&Rational::from_int(1)), poly(&[5, 2]));
    }

    #[test]
    fn test_derivative() {
        assert_eq!(poly(&[-5, 3, 2]).derivative(), poly(&[3, 4]));
    }

    #[test]
    fn test_from_expr() {
        // 2x**2 + 3x - 5
        let expr = Expr::Add(vec![
            Expr::Mul(vec![
                Expr::int(2),
                Expr::pow(Expr::symbol("x"), Expr::int(2)),
            ]),
            Expr::Mul(vec![Expr::int(3), Expr::symbol("x")]),
            Expr::neg(Expr::int(5)),
        ]);
        let p = Polynomial::from_expr(&expr, "x").unwrap();
        assert_eq!(p, poly(&[-5, 3, 2]));
    }

    #[test]
    fn test_from_expr_rejects_functions() {
        let expr = Expr::func(crate::expr::Func::Sin, Expr::symbol("x"));
        assert!(Polynomial::from_expr(&expr, "x").is_none());
    }

    #[test]
    fn test_rational_roots() {
        // 2x^2 + 3x - 5 has roots -5/2 and 1.
        let (roots, rest) = poly(&[-5, 3, 2]).rational_roots().unwrap();
        assert_eq!(
            roots,
            vec![
                (Rational::from_i64(-5, 2), 1),
                (Rational::from_int(1), 1),
            ]
        );
        assert_eq!(rest.degree(), Some(0));
    }

    #[test]
    fn test_rational_roots_multiplicity() {
        // (x - 1)^2
        let (roots, _) = poly(&[1, -2, 1]).rational_roots().unwrap();
        assert_eq!(roots, vec![(Rational::from_int(1), 2)]);
    }

    #[test]
    fn test_to_int_primitive() {
        // x/2 - 1/3 -> content 1/6, primitive 3x - 2
        let p = Polynomial::new(vec![
            Rational::from_i64(-1, 3),
            Rational::from_i64(1, 2),
        ]);
        let (content, ints) = p.to_int_primitive().unwrap();
        assert_eq!(content, Rational::from_i64(1, 6));
        assert_eq!(ints, vec![-2, 3]);
    }

    #[test]
    fn test_to_expr_roundtrip() {
        let p = poly(&[-5, 3, 2]);
        let expr = p.to_expr("x");
        assert_eq!(Polynomial::from_expr(&expr, "x").unwrap(), p);
    }
}
