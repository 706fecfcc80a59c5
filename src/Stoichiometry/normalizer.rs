//! # Coefficient Normalizer
//!
//! Back-substitution of the single free column and conversion of the rational basis
//! vector to the smallest set of coprime positive integers.
use super::errors::{StoichError, StoichResult};
use super::rational::Fraction;
use log::debug;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// rational null-space basis vector: free column set to 1, pivot columns solved
/// from the last pivot row to the first
pub fn null_space_vector(
    rref: &[Vec<Fraction>],
    pivot_columns: &[usize],
    total_columns: usize,
) -> StoichResult<Vec<Fraction>> {
    let free: Vec<usize> = (0..total_columns)
        .filter(|c| !pivot_columns.contains(c))
        .collect();
    if free.len() != 1 {
        return Err(StoichError::CannotBalanceUniquely {
            free_columns: free.len(),
        });
    }
    let mut coefficients = vec![Fraction::zero(); total_columns];
    coefficients[free[0]] = Fraction::one();
    for (row, &col) in pivot_columns.iter().enumerate().rev() {
        let sum = ((col + 1)..total_columns).fold(Fraction::zero(), |acc, j| {
            acc + &rref[row][j] * &coefficients[j]
        });
        coefficients[col] = -sum;
    }
    Ok(coefficients)
}

/// scales rational coefficients to coprime integers (sign preserved)
pub fn to_coprime_integers(coefficients: &[Fraction]) -> Vec<BigInt> {
    let common_denominator = coefficients
        .iter()
        .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
    let integers: Vec<BigInt> = coefficients
        .iter()
        .map(|c| c.numer() * (&common_denominator / c.denom()))
        .collect();
    let divisor = integers.iter().fold(BigInt::zero(), |acc, n| acc.gcd(n));
    if divisor > BigInt::one() {
        integers.iter().map(|n| n / &divisor).collect()
    } else {
        integers
    }
}

/// full normalization: back-substitution, integer scaling, GCD reduction and the
/// sign convention. An all non-positive vector is negated; mixed signs (or a compound
/// that ends up with coefficient 0) fail with `InconsistentSigns`.
pub fn normalize(
    rref: &[Vec<Fraction>],
    pivot_columns: &[usize],
    total_columns: usize,
) -> StoichResult<Vec<u64>> {
    let rational = null_space_vector(rref, pivot_columns, total_columns)?;
    let mut integers = to_coprime_integers(&rational);
    debug!("integer null-space vector before sign convention {:?}", integers);
    if integers.iter().all(|n| n.sign() != Sign::Plus) {
        integers.iter_mut().for_each(|n| *n = -&*n);
    }
    if integers.iter().any(|n| !n.is_positive()) {
        return Err(StoichError::InconsistentSigns(integers));
    }
    integers
        .iter()
        .map(|n| {
            n.to_u64().ok_or_else(|| {
                StoichError::InvalidInput(format!("coefficient {} does not fit into u64", n))
            })
        })
        .collect()
}
