use super::errors::{StoichError, StoichResult};
use super::normalizer::normalize;
use super::null_space::{row_reduce, solve};
use super::stoich_matrix::StoichiometricMatrix;
use log::{debug, info};
use num_bigint::BigInt;

/// balances a reaction given as reactant and product formulas.
/// Returns one minimal positive integer coefficient per compound, reactants first.
/// Any coefficients the caller may already have are not used, so the result depends
/// only on the formulas.
pub fn balance_formulas(reactants: &[&str], products: &[&str]) -> StoichResult<Vec<u64>> {
    if reactants.is_empty() || products.is_empty() {
        return Err(StoichError::InvalidInput(
            "at least one reactant and one product are required".to_string(),
        ));
    }
    let matrix = StoichiometricMatrix::build(reactants, products)?;
    debug!("balancing matrix {:?}", matrix.entries);
    if !matrix.sides_share_element() {
        let free_columns = row_reduce(&matrix.entries, matrix.ncols())?.free_columns.len();
        return Err(StoichError::CannotBalanceUniquely { free_columns });
    }
    let solution = solve(&matrix)?;
    let coefficients = normalize(&solution.rref, &solution.pivot_columns, matrix.ncols())?;
    // exact elimination should never produce a non-conserving vector
    if !matrix.conserves(&coefficients) {
        return Err(StoichError::InconsistentSigns(
            coefficients.iter().map(|&c| BigInt::from(c)).collect(),
        ));
    }
    info!(
        "balanced {} -> {}: {:?}",
        reactants.join(" + "),
        products.join(" + "),
        coefficients
    );
    Ok(coefficients)
}
