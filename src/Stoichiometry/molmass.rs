//! Module to calculate the atomic composition and molar mass of a chemical formula
//!
use super::errors::{StoichError, StoichResult};
use super::formula_parser::{ElementCountMap, parse_formula};
use log::debug;

// Define a struct to hold element data
pub struct Element {
    pub name: &'static str,
    pub atomic_mass: f64,
}

const fn el(name: &'static str, atomic_mass: f64) -> Element {
    Element { name, atomic_mass }
}

// standard atomic masses, g/mol
const ELEMENTS: &[Element] = &[
    el("H", 1.008),
    el("He", 4.0026),
    el("Li", 6.94),
    el("Be", 9.0122),
    el("B", 10.81),
    el("C", 12.011),
    el("N", 14.007),
    el("O", 15.999),
    el("F", 18.998),
    el("Ne", 20.18),
    el("Na", 22.99),
    el("Mg", 24.305),
    el("Al", 26.982),
    el("Si", 28.085),
    el("P", 30.974),
    el("S", 32.06),
    el("Cl", 35.45),
    el("Ar", 39.948),
    el("K", 39.098),
    el("Ca", 40.078),
    el("Sc", 44.956),
    el("Ti", 47.867),
    el("V", 50.942),
    el("Cr", 51.996),
    el("Mn", 54.938),
    el("Fe", 55.845),
    el("Co", 58.933),
    el("Ni", 58.693),
    el("Cu", 63.546),
    el("Zn", 65.38),
    el("Ga", 69.723),
    el("Ge", 72.63),
    el("As", 74.922),
    el("Se", 78.971),
    el("Br", 79.904),
    el("Kr", 83.798),
    el("Rb", 85.468),
    el("Sr", 87.62),
    el("Y", 88.906),
    el("Zr", 91.224),
    el("Nb", 92.906),
    el("Mo", 95.95),
    el("Tc", 98.0),
    el("Ru", 101.07),
    el("Rh", 102.91),
    el("Pd", 106.42),
    el("Ag", 107.87),
    el("Cd", 112.41),
    el("In", 114.82),
    el("Sn", 118.71),
    el("Sb", 121.76),
    el("Te", 127.6),
    el("I", 126.9),
    el("Xe", 131.29),
    el("Cs", 132.91),
    el("Ba", 137.33),
    el("La", 138.91),
    el("Ce", 140.12),
    el("W", 183.84),
    el("Pt", 195.08),
    el("Au", 196.97),
    el("Hg", 200.59),
    el("Pb", 207.2),
    el("Bi", 208.98),
    el("U", 238.03),
];

/// atomic mass of an element symbol, `None` for unknown symbols
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|e| e.name == symbol)
        .map(|e| e.atomic_mass)
}

/// molar mass of an already parsed composition
pub fn molar_mass_of_composition(counts: &ElementCountMap) -> StoichResult<f64> {
    let mut molar_mass = 0.0;
    for (element, &count) in counts {
        let mass = atomic_mass(element).ok_or_else(|| {
            StoichError::MissingMolarMass(format!("element {} has no atomic mass", element))
        })?;
        molar_mass += mass * count as f64;
    }
    Ok(molar_mass)
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(formula: &str) -> StoichResult<(f64, ElementCountMap)> {
    let counts = parse_formula(formula)?;
    let molar_mass = molar_mass_of_composition(&counts)?;
    debug!("molar mass of {}: {} g/mol", formula, molar_mass);
    Ok((molar_mass, counts))
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs(vec_of_formulae: &[&str]) -> StoichResult<Vec<f64>> {
    vec_of_formulae
        .iter()
        .map(|formula| calculate_molar_mass(formula).map(|(m, _)| m))
        .collect()
}
