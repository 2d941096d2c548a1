//! Exact rational arithmetic.
//!
//! A thin wrapper over `dashu`'s arbitrary precision rationals, kept in
//! lowest terms with a positive denominator.

use dashu::base::UnsignedAbs;
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An arbitrary precision rational number in lowest terms.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: IBig, denominator: IBig) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let numerator = if denominator < IBig::ZERO {
            -numerator
        } else {
            numerator
        };
        Self(RBig::from_parts(numerator, denominator.unsigned_abs()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(IBig::from(numerator), IBig::from(denominator))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_int(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }

    /// Parses a decimal literal such as `"12"` or `"0.5"` into an exact
    /// rational (`0.5` becomes `1/2`).
    #[must_use]
    pub fn from_decimal(integer_part: &str, fraction_part: &str) -> Option<Self> {
        let digits = format!("{integer_part}{fraction_part}");
        let numerator: IBig = digits.parse().ok()?;
        let denominator = IBig::from(10).pow(fraction_part.len());
        Some(Self::new(numerator, denominator))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> IBig {
        self.0.numerator().clone()
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> IBig {
        IBig::from(self.0.denominator().clone())
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        *self.0.denominator() == UBig::ONE
    }

    /// Returns true if the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < RBig::ZERO
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    /// Returns the reciprocal, or `None` for zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self::new(self.denominator(), self.numerator()))
        }
    }

    /// Computes self^exp for an integer exponent.
    ///
    /// Returns `None` for `0^negative`.
    #[must_use]
    pub fn pow(&self, exp: i64) -> Option<Self> {
        if exp == 0 {
            return Some(Self::one());
        }
        let k = exp.unsigned_abs() as usize;
        let raised = Self::new(self.numerator().pow(k), self.denominator().pow(k));
        if exp > 0 {
            Some(raised)
        } else {
            raised.recip()
        }
    }

    /// Attempts to convert to an i64, when the value is an integer that
    /// fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.numerator().try_into().ok()
    }

    /// Attempts to convert to an i128, when the value is an integer that
    /// fits.
    #[must_use]
    pub fn to_i128(&self) -> Option<i128> {
        if !self.is_integer() {
            return None;
        }
        self.numerator().try_into().ok()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Self::Output {
        Rational(&self.0 / &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_int(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_terms() {
        let r = Rational::from_i64(4, 8);
        assert_eq!(r, Rational::from_i64(1, 2));
        assert_eq!(r.to_string(), "1/2");
    }

    #[test]
    fn test_negative_denominator() {
        let r = Rational::from_i64(1, -2);
        assert!(r.is_negative());
        assert_eq!(r.to_string(), "-1/2");
    }

    #[test]
    fn test_arithmetic() {
        let a = Rational::from_i64(1, 2);
        let b = Rational::from_i64(1, 3);
        assert_eq!(&a + &b, Rational::from_i64(5, 6));
        assert_eq!(&a - &b, Rational::from_i64(1, 6));
        assert_eq!(&a * &b, Rational::from_i64(1, 6));
        assert_eq!(&a / &b, Rational::from_i64(3, 2));
    }

    #[test]
    fn test_pow() {
        let r = Rational::from_i64(2, 3);
        assert_eq!(r.pow(2), Some(Rational::from_i64(4, 9)));
        assert_eq!(r.pow(-1), Some(Rational::from_i64(3, 2)));
        assert_eq!(r.pow(0), Some(Rational::one()));
        assert_eq!(Rational::zero().pow(-1), None);
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(
            Rational::from_decimal("0", "5"),
            Some(Rational::from_i64(1, 2))
        );
        assert_eq!(
            Rational::from_decimal("12", ""),
            Some(Rational::from_int(12))
        );
        assert_eq!(
            Rational::from_decimal("1", "25"),
            Some(Rational::from_i64(5, 4))
        );
    }
}
