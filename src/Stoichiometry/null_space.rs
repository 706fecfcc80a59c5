//! # Null Space Solver
//!
//! Gauss-Jordan elimination over exact fractions. Partial pivoting picks, per column,
//! the row at or below the current pivot row with the largest magnitude entry. The
//! magnitude comparison is exact as well, so no value is ever rounded.
//!
//! A column becomes a pivot column once a non-zero pivot is found: the pivot row is
//! divided by the pivot and the column is eliminated from every other row. Columns
//! without a pivot are free. A connected reaction has a one-dimensional coefficient
//! null space, so balancing needs exactly one free column.
use super::errors::{StoichError, StoichResult};
use super::rational::{Fraction, checked_div};
use super::stoich_matrix::StoichiometricMatrix;
use log::debug;
use num_traits::{Signed, Zero};

/// reduced row echelon form with pivot bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct RrefSolution {
    pub rref: Vec<Vec<Fraction>>,
    /// pivot column of row `i` is `pivot_columns[i]`
    pub pivot_columns: Vec<usize>,
    pub free_columns: Vec<usize>,
}

/// reduces `rows` (each of length `ncols`) to reduced row echelon form
pub fn row_reduce(rows: &[Vec<Fraction>], ncols: usize) -> StoichResult<RrefSolution> {
    let mut a: Vec<Vec<Fraction>> = rows.to_vec();
    let nrows = a.len();
    let mut pivot_columns = Vec::new();
    let mut pivot_row = 0;
    for col in 0..ncols {
        if pivot_row >= nrows {
            break;
        }
        let best = (pivot_row..nrows)
            .filter(|&r| !a[r][col].is_zero())
            .max_by(|&r1, &r2| a[r1][col].abs().cmp(&a[r2][col].abs()));
        let Some(best) = best else {
            // no usable pivot, column stays free
            continue;
        };
        a.swap(pivot_row, best);

        let pivot = a[pivot_row][col].clone();
        for entry in a[pivot_row].iter_mut() {
            *entry = checked_div(entry, &pivot)?;
        }
        let normalized_row = a[pivot_row].clone();
        for (r, row) in a.iter_mut().enumerate() {
            if r == pivot_row || row[col].is_zero() {
                continue;
            }
            let factor = row[col].clone();
            for (entry, p) in row.iter_mut().zip(normalized_row.iter()) {
                *entry -= &factor * p;
            }
        }
        pivot_columns.push(col);
        pivot_row += 1;
    }
    let free_columns = (0..ncols).filter(|c| !pivot_columns.contains(c)).collect();
    Ok(RrefSolution {
        rref: a,
        pivot_columns,
        free_columns,
    })
}

/// eliminates the stoichiometric matrix and checks that exactly one column is free
pub fn solve(matrix: &StoichiometricMatrix) -> StoichResult<RrefSolution> {
    let solution = row_reduce(&matrix.entries, matrix.ncols())?;
    debug!(
        "rank {}, pivot columns {:?}, free columns {:?}",
        solution.pivot_columns.len(),
        solution.pivot_columns,
        solution.free_columns
    );
    if solution.free_columns.len() != 1 {
        return Err(StoichError::CannotBalanceUniquely {
            free_columns: solution.free_columns.len(),
        });
    }
    Ok(solution)
}
