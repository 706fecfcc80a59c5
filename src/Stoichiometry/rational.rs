//! # Exact Rational Arithmetic Module
//!
//! ## Purpose
//! Exact fractions used while eliminating the balancing matrix. Every matrix entry
//! stays a reduced arbitrary-precision fraction until the final integer scaling step,
//! so large atom counts and long elimination chains can not overflow.
//!
//! `Fraction` is `num_rational::BigRational`: denominators are kept positive and
//! every value is stored in lowest terms. The helpers below add the fallible
//! constructor and division the elimination needs.
//!
//! `to_f64()` exists only for the floating point matrix view, never for results.
use super::errors::{StoichError, StoichResult};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

pub type Fraction = BigRational;

/// creates a reduced fraction, fails with `DivisionByZero` if `den == 0`
pub fn fraction(num: i64, den: i64) -> StoichResult<Fraction> {
    if den == 0 {
        return Err(StoichError::DivisionByZero);
    }
    Ok(BigRational::new(BigInt::from(num), BigInt::from(den)))
}

/// exact integer as a fraction
pub fn integer<T: Into<BigInt>>(n: T) -> Fraction {
    BigRational::from_integer(n.into())
}

/// exact division, fails with `DivisionByZero` when `rhs` is zero
pub fn checked_div(lhs: &Fraction, rhs: &Fraction) -> StoichResult<Fraction> {
    if rhs.is_zero() {
        return Err(StoichError::DivisionByZero);
    }
    Ok(lhs / rhs)
}

/// lossy conversion; NaN when the value does not fit into f64
pub fn to_f64(value: &Fraction) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;
    use num_traits::{One, Signed};

    fn fr(n: i64, d: i64) -> Fraction {
        fraction(n, d).unwrap()
    }

    #[test]
    fn test_new_reduces_and_moves_sign() {
        let f = fr(6, -8);
        assert_eq!(*f.numer(), BigInt::from(-3));
        assert_eq!(*f.denom(), BigInt::from(4));
        let z = fr(0, -5);
        assert!(z.is_zero());
        assert!(z.denom().is_one());
    }

    #[test]
    fn test_zero_denominator_is_error() {
        assert!(matches!(fraction(1, 0), Err(StoichError::DivisionByZero)));
        assert!(matches!(
            checked_div(&fr(1, 2), &Fraction::zero()),
            Err(StoichError::DivisionByZero)
        ));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(fr(1, 2) + fr(1, 3), fr(5, 6));
        assert_eq!(fr(1, 2) - fr(1, 3), fr(1, 6));
        assert_eq!(fr(2, 3) * fr(9, 4), fr(3, 2));
        assert_eq!(checked_div(&fr(2, 3), &fr(-4, 9)).unwrap(), fr(-3, 2));
        assert_eq!(-fr(2, 7), fr(-2, 7));
        assert!((fr(1, 6) + fr(-1, 6)).is_zero());
    }

    #[test]
    fn test_results_stay_in_lowest_terms() {
        let prod = fr(4, 6) * fr(3, 8);
        assert_eq!((prod.numer().clone(), prod.denom().clone()), (BigInt::from(1), BigInt::from(4)));
        assert!(prod.numer().gcd(prod.denom()).is_one());
    }

    #[test]
    fn test_values_beyond_machine_integers() {
        // products of two 2e9 counts over a chain of pivots exceed i128 quickly
        let big = integer(2_000_000_000i64);
        let mut acc = Fraction::one();
        for _ in 0..8 {
            acc = acc * &big;
        }
        let back = (0..8).try_fold(acc, |acc, _| checked_div(&acc, &big)).unwrap();
        assert!(back.is_one());
        assert!(integer(i64::MAX) * integer(i64::MAX) > integer(i64::MAX));
    }

    #[test]
    fn test_ordering_and_float() {
        assert!(fr(1, 3) < fr(1, 2));
        assert!(fr(-1, 2) < fr(-1, 3));
        assert_eq!(fr(3, 4).abs(), fr(-3, 4).abs());
        assert!((to_f64(&fr(1, 4)) - 0.25).abs() < 1e-15);
        assert_eq!(format!("{}", fr(-3, 4)), "-3/4");
        assert_eq!(format!("{}", fr(8, 4)), "2");
    }
}
