//! # Stoichiometric Matrix Builder
//!
//! Builds the signed element-by-compound matrix of a reaction.
//! - rows: union of elements of all compounds, in order of first appearance
//!   (compounds scanned reactants first, elements of one compound alphabetically)
//! - columns: `[reactants..., products...]` in input order
//! - entry: atom count, **negative for reactants, positive for products**
//!
//! With this sign convention a vector of positive coefficients `ν` balances the reaction
//! exactly when `A·ν = 0`. The coefficients themselves are unknown at this stage; every
//! column carries an implicit coefficient of 1.
use super::errors::StoichResult;
use super::formula_parser::{ElementCountMap, parse_formula};
use super::rational::{Fraction, integer, to_f64};
use log::debug;
use nalgebra::DMatrix;
use num_traits::Zero;

#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometricMatrix {
    /// row labels
    pub elements: Vec<String>,
    /// column labels (formulas as given)
    pub compounds: Vec<String>,
    /// number of leading columns that are reactants
    pub n_reactants: usize,
    /// `entries[row][column]`
    pub entries: Vec<Vec<Fraction>>,
}

impl StoichiometricMatrix {
    /// parses every formula and builds the signed matrix
    pub fn build(reactants: &[&str], products: &[&str]) -> StoichResult<Self> {
        let mut compositions = Vec::with_capacity(reactants.len() + products.len());
        for formula in reactants.iter().chain(products.iter()) {
            compositions.push(parse_formula(formula)?);
        }
        let compounds = reactants
            .iter()
            .chain(products.iter())
            .map(|s| s.to_string())
            .collect();
        Ok(Self::from_compositions(compounds, &compositions, reactants.len()))
    }

    /// builds the matrix from already parsed compositions; the first `n_reactants` are reactants
    pub fn from_compositions(
        compounds: Vec<String>,
        compositions: &[ElementCountMap],
        n_reactants: usize,
    ) -> Self {
        let mut elements: Vec<String> = Vec::new();
        for composition in compositions {
            for element in composition.keys() {
                if !elements.contains(element) {
                    elements.push(element.clone());
                }
            }
        }
        let mut entries = vec![vec![Fraction::zero(); compositions.len()]; elements.len()];
        for (column, composition) in compositions.iter().enumerate() {
            for (row, element) in elements.iter().enumerate() {
                if let Some(&count) = composition.get(element) {
                    let count = integer(count);
                    entries[row][column] = if column < n_reactants { -count } else { count };
                }
            }
        }
        debug!(
            "stoichiometric matrix {}x{} for elements {:?}",
            elements.len(),
            compositions.len(),
            elements
        );
        StoichiometricMatrix {
            elements,
            compounds,
            n_reactants,
            entries,
        }
    }

    pub fn nrows(&self) -> usize {
        self.entries.len()
    }

    pub fn ncols(&self) -> usize {
        self.compounds.len()
    }

    /// true if at least one element occurs both in a reactant and in a product
    pub fn sides_share_element(&self) -> bool {
        self.entries.iter().any(|row| {
            let (reactants, products) = row.split_at(self.n_reactants.min(row.len()));
            reactants.iter().any(|f| !f.is_zero()) && products.iter().any(|f| !f.is_zero())
        })
    }

    /// floating point view of the matrix (elements x compounds)
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.nrows(), self.ncols(), |i, j| to_f64(&self.entries[i][j]))
    }

    /// net atoms of every element for the given coefficients, products minus reactants
    pub fn element_imbalance(&self, coefficients: &[u64]) -> Vec<(String, Fraction)> {
        self.elements
            .iter()
            .zip(self.entries.iter())
            .map(|(element, row)| {
                let net = row
                    .iter()
                    .zip(coefficients.iter())
                    .fold(Fraction::zero(), |acc, (entry, &nu)| {
                        acc + entry * integer(nu)
                    });
                (element.clone(), net)
            })
            .collect()
    }

    /// true if every element is conserved with the given coefficients
    pub fn conserves(&self, coefficients: &[u64]) -> bool {
        coefficients.len() == self.ncols()
            && self
                .element_imbalance(coefficients)
                .iter()
                .all(|(_, net)| net.is_zero())
    }
}
