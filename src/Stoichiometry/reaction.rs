//! # Reaction
//!
//! Ordered reactants and products, each with a display name, a formula and a
//! stoichiometric coefficient (1 until balanced). Reactions are values: balancing
//! returns a new reaction instead of mutating the old one.
//!
//! Equations are accepted in the usual text form, e.g. `CH4 + 2O2 -> CO2 + 2H2O`.
//! Accepted arrows: `->`, `=>`, `<->`, `<=>`, `→`, `⟶`, `=`.
use super::balancer::balance_formulas;
use super::compound_library::CompoundLibrary;
use super::errors::{StoichError, StoichResult};
use super::stoich_matrix::StoichiometricMatrix;
use regex::Regex;
use std::fmt;

const ARROW_PATTERN: &str = r"<=>|<->|->|=>|→|⟶|=";
const TERM_PATTERN: &str = r"^(\d+)?\s*(\S.*)$";

#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub formula: String,
    pub coefficient: u64,
}

impl Species {
    /// species whose name is its formula
    pub fn new(formula: &str) -> Self {
        Self {
            name: formula.to_string(),
            formula: formula.to_string(),
            coefficient: 1,
        }
    }

    pub fn with_coefficient(mut self, coefficient: u64) -> Self {
        self.coefficient = coefficient;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub reactants: Vec<Species>,
    pub products: Vec<Species>,
}

impl Reaction {
    pub fn new(reactants: Vec<Species>, products: Vec<Species>) -> Self {
        Self {
            reactants,
            products,
        }
    }

    /// builds a reaction from compound names, formulas come from the library
    /// (a name the library does not know is used as the formula)
    pub fn from_names(reactants: &[&str], products: &[&str], library: &CompoundLibrary) -> Self {
        let species = |name: &&str| Species {
            name: name.to_string(),
            formula: library.formula_of(name),
            coefficient: 1,
        };
        Self {
            reactants: reactants.iter().map(species).collect(),
            products: products.iter().map(species).collect(),
        }
    }

    /// parses `"2H2 + O2 -> 2H2O"`; leading integers become pre-set coefficients
    pub fn from_equation(equation: &str) -> StoichResult<Self> {
        let arrow = Regex::new(ARROW_PATTERN).map_err(|e| StoichError::ParseError(e.to_string()))?;
        let sides: Vec<&str> = arrow.split(equation).collect();
        if sides.len() != 2 {
            return Err(StoichError::ParseError(format!(
                "expected exactly one arrow in '{}', found {}",
                equation,
                sides.len().saturating_sub(1)
            )));
        }
        let term = Regex::new(TERM_PATTERN).map_err(|e| StoichError::ParseError(e.to_string()))?;
        let reactants = parse_side(sides[0], &term, equation)?;
        let products = parse_side(sides[1], &term, equation)?;
        Ok(Self {
            reactants,
            products,
        })
    }

    /// a copy of the reaction with minimal integer coefficients computed from the formulas
    pub fn balanced(&self) -> StoichResult<Self> {
        let reactant_formulas: Vec<&str> = self.reactants.iter().map(|s| s.formula.as_str()).collect();
        let product_formulas: Vec<&str> = self.products.iter().map(|s| s.formula.as_str()).collect();
        let coefficients = balance_formulas(&reactant_formulas, &product_formulas)?;
        let mut balanced = self.clone();
        for (species, &nu) in balanced
            .reactants
            .iter_mut()
            .chain(balanced.products.iter_mut())
            .zip(coefficients.iter())
        {
            species.coefficient = nu;
        }
        Ok(balanced)
    }

    /// coefficients in column order, reactants first
    pub fn coefficients(&self) -> Vec<u64> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .map(|s| s.coefficient)
            .collect()
    }

    /// true if the current coefficients conserve every element
    pub fn is_balanced(&self) -> StoichResult<bool> {
        Ok(self.matrix()?.conserves(&self.coefficients()))
    }

    pub fn matrix(&self) -> StoichResult<StoichiometricMatrix> {
        let reactant_formulas: Vec<&str> = self.reactants.iter().map(|s| s.formula.as_str()).collect();
        let product_formulas: Vec<&str> = self.products.iter().map(|s| s.formula.as_str()).collect();
        StoichiometricMatrix::build(&reactant_formulas, &product_formulas)
    }

    /// `2H2 + O2 → 2H2O`, coefficient 1 omitted
    pub fn equation(&self) -> String {
        format!("{} → {}", render_side(&self.reactants), render_side(&self.products))
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.equation())
    }
}

fn parse_side(side: &str, term: &Regex, equation: &str) -> StoichResult<Vec<Species>> {
    let mut species = Vec::new();
    for raw in side.split('+') {
        let raw = raw.trim();
        let captures = term.captures(raw).ok_or_else(|| {
            StoichError::ParseError(format!("empty term in '{}'", equation))
        })?;
        let coefficient = match captures.get(1) {
            Some(digits) => digits.as_str().parse::<u64>().map_err(|e| {
                StoichError::ParseError(format!("bad coefficient '{}': {}", digits.as_str(), e))
            })?,
            None => 1,
        };
        if coefficient == 0 {
            return Err(StoichError::InvalidInput(format!(
                "coefficient of '{}' must be positive",
                raw
            )));
        }
        let formula = captures.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        species.push(Species::new(formula).with_coefficient(coefficient));
    }
    Ok(species)
}

fn render_side(species: &[Species]) -> String {
    species
        .iter()
        .map(|s| {
            if s.coefficient > 1 {
                format!("{}{}", s.coefficient, s.name)
            } else {
                s.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_equation() {
        let r = Reaction::from_equation("CH4 + 2O2 -> CO2 + 2 H2O").unwrap();
        assert_eq!(r.reactants.len(), 2);
        assert_eq!(r.products.len(), 2);
        assert_eq!(r.reactants[1].formula, "O2");
        assert_eq!(r.coefficients(), vec![1, 2, 1, 2]);
        assert!(r.is_balanced().unwrap());
    }

    #[test]
    fn test_arrows() {
        for eq in ["H2 + O2 = H2O", "H2 + O2 => H2O", "H2 + O2 → H2O", "H2+O2<=>H2O"] {
            let r = Reaction::from_equation(eq).unwrap();
            assert_eq!(r.products[0].formula, "H2O");
        }
    }

    #[test]
    fn test_bad_equations() {
        assert!(matches!(
            Reaction::from_equation("H2 + O2 H2O"),
            Err(StoichError::ParseError(_))
        ));
        assert!(matches!(
            Reaction::from_equation("H2 -> O2 -> H2O"),
            Err(StoichError::ParseError(_))
        ));
        assert!(matches!(
            Reaction::from_equation("H2 + -> H2O"),
            Err(StoichError::ParseError(_))
        ));
        assert!(matches!(
            Reaction::from_equation("0H2 + O2 -> H2O"),
            Err(StoichError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_balanced_copy() {
        let r = Reaction::from_equation("H2 + O2 -> H2O").unwrap();
        assert!(!r.is_balanced().unwrap());
        let b = r.balanced().unwrap();
        assert_eq!(b.coefficients(), vec![2, 1, 2]);
        assert_eq!(r.coefficients(), vec![1, 1, 1]);
        assert_eq!(b.equation(), "2H2 + O2 → 2H2O");
        assert_eq!(format!("{}", b), b.equation());
    }

    #[test]
    fn test_from_names_uses_library_formulas() {
        let lib = CompoundLibrary::builtin();
        let r = Reaction::from_names(&["CuSO4_5H2O"], &["CuSO4", "H2O"], &lib);
        assert_eq!(r.reactants[0].formula, "CuSO4·5H2O");
        let b = r.balanced().unwrap();
        assert_eq!(b.coefficients(), vec![1, 1, 5]);
        assert_eq!(b.equation(), "CuSO4_5H2O → CuSO4 + 5H2O");
    }
}
