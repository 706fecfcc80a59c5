//! # Compound Library
//!
//! ## Purpose
//! Lookup collaborator of the stoichiometry engine: maps a compound display name to
//! its formula and molar mass. Lookup is by exact name; a missing entry means
//! "molar mass unknown", which is fine for mole-basis calculations and an error only
//! when a mass basis needs it.
//!
//! ## Sources of data
//! - built-in table of common laboratory and industrial compounds (`CompoundLibrary::builtin`)
//! - JSON file `{"name": {"formula": "...", "molar_mass": 18.015}, ...}`
//! - entries inserted at runtime
//!
//! Optionally (see `settings::CalculatorConfig::derive_molar_mass_from_formula`) a
//! missing molar mass is computed from the formula and the atomic-mass table.
//!
//! ## Usage
//! ```rust
//! use ChemCalc::Stoichiometry::compound_library::CompoundLibrary;
//! let lib = CompoundLibrary::builtin();
//! let water = lib.lookup("H2O").unwrap();
//! assert_eq!(water.formula, "H2O");
//! assert!(lib.lookup("unobtainium").is_none());
//! ```
use super::errors::StoichResult;
use super::molmass::calculate_molar_mass;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub formula: String,
    /// g/mol
    pub molar_mass: f64,
}

// (name, formula, molar mass g/mol)
const BUILTIN_COMPOUNDS: &[(&str, &str, f64)] = &[
    ("H2O", "H2O", 18.015),
    ("CO2", "CO2", 44.01),
    ("O2", "O2", 32.0),
    ("N2", "N2", 28.02),
    ("NH3", "NH3", 17.03),
    ("H2", "H2", 2.016),
    ("HCl", "HCl", 36.46),
    ("NaCl", "NaCl", 58.44),
    ("KCl", "KCl", 74.55),
    ("NaOH", "NaOH", 40.0),
    ("KOH", "KOH", 56.11),
    ("CaCO3", "CaCO3", 100.09),
    ("CaO", "CaO", 56.08),
    ("Ca(OH)2", "Ca(OH)2", 74.09),
    ("H2SO4", "H2SO4", 98.08),
    ("HNO3", "HNO3", 63.01),
    ("H3PO4", "H3PO4", 97.99),
    ("Na2CO3", "Na2CO3", 105.99),
    ("NaHCO3", "NaHCO3", 84.01),
    ("Cl2", "Cl2", 70.9),
    ("SO2", "SO2", 64.07),
    ("SO3", "SO3", 80.06),
    // hydrocarbons
    ("CH4", "CH4", 16.04),
    ("C2H6", "C2H6", 30.07),
    ("C3H8", "C3H8", 44.1),
    ("C4H10", "C4H10", 58.12),
    ("C6H6", "C6H6", 78.11),
    ("C8H18", "C8H18", 114.23),
    // alcohols
    ("CH3OH", "CH3OH", 32.04),
    ("C2H5OH", "C2H5OH", 46.07),
    ("C3H7OH", "C3H7OH", 60.1),
    ("C4H9OH", "C4H9OH", 74.12),
    // organic acids
    ("CH3COOH", "CH3COOH", 60.05),
    ("HCOOH", "HCOOH", 46.03),
    ("C6H5COOH", "C6H5COOH", 122.12),
    ("C6H12O6", "C6H12O6", 180.16),
    // industrial gases
    ("CO", "CO", 28.01),
    ("NO", "NO", 30.01),
    ("NO2", "NO2", 46.01),
    ("N2O", "N2O", 44.01),
    ("NH4Cl", "NH4Cl", 53.49),
    // oxides and salts
    ("Fe2O3", "Fe2O3", 159.69),
    ("Fe3O4", "Fe3O4", 231.54),
    ("Al2O3", "Al2O3", 101.96),
    ("SiO2", "SiO2", 60.08),
    ("CuSO4", "CuSO4", 159.61),
    ("CuSO4_5H2O", "CuSO4·5H2O", 249.68),
];

#[derive(Debug, Clone, Default)]
pub struct CompoundLibrary {
    compounds: HashMap<String, CompoundRecord>,
    derive_molar_mass_from_formula: bool,
}

impl CompoundLibrary {
    /// empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// library filled with the built-in compound table
    pub fn builtin() -> Self {
        let compounds = BUILTIN_COMPOUNDS
            .iter()
            .map(|&(name, formula, molar_mass)| {
                (
                    name.to_string(),
                    CompoundRecord {
                        formula: formula.to_string(),
                        molar_mass,
                    },
                )
            })
            .collect();
        Self {
            compounds,
            derive_molar_mass_from_formula: false,
        }
    }

    pub fn from_json_str(json: &str) -> StoichResult<Self> {
        let compounds: HashMap<String, CompoundRecord> = serde_json::from_str(json)?;
        Ok(Self {
            compounds,
            derive_molar_mass_from_formula: false,
        })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> StoichResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let library = Self::from_json_str(&content)?;
        info!(
            "loaded {} compounds from {}",
            library.len(),
            path.as_ref().display()
        );
        Ok(library)
    }

    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> StoichResult<()> {
        let content = serde_json::to_string_pretty(&self.compounds)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn set_derive_molar_mass_from_formula(&mut self, derive: bool) {
        self.derive_molar_mass_from_formula = derive;
    }

    pub fn insert(&mut self, name: &str, formula: &str, molar_mass: f64) {
        self.compounds.insert(
            name.to_string(),
            CompoundRecord {
                formula: formula.to_string(),
                molar_mass,
            },
        );
    }

    /// exact-name lookup
    pub fn lookup(&self, name: &str) -> Option<&CompoundRecord> {
        self.compounds.get(name)
    }

    /// formula of a known compound, otherwise the name itself is taken as the formula
    pub fn formula_of(&self, name: &str) -> String {
        self.lookup(name)
            .map(|record| record.formula.clone())
            .unwrap_or_else(|| name.to_string())
    }

    /// molar mass from the table, or from the formula when derivation is enabled
    pub fn molar_mass_of(&self, name: &str) -> Option<f64> {
        if let Some(record) = self.lookup(name) {
            return Some(record.molar_mass);
        }
        if self.derive_molar_mass_from_formula {
            match calculate_molar_mass(name) {
                Ok((molar_mass, _)) if molar_mass > 0.0 => return Some(molar_mass),
                Ok(_) => {}
                Err(e) => debug!("molar mass of '{}' could not be derived: {}", name, e),
            }
        }
        None
    }

    /// compound names in alphabetical order
    pub fn names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.compounds.keys().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}
