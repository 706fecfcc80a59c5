//! # Reaction Extent Engine
//!
//! ## Purpose
//! Given stoichiometric coefficients, initial reactant amounts and an optional target
//! conversion, computes the limiting reactant, the extent of reaction, reacted and
//! remaining amounts of every species, percent conversion, percent excess of the
//! non-limiting reactants and product yields.
//!
//! ## Logic
//! - available extent of reactant `i` = `n0_i / ν_i`
//! - limiting reactant = minimal available extent among reactants with `n0_i > 0`
//!   (first one on ties)
//! - extent `ξ = X · n0_d / ν_d` where `X` is the conversion fraction (default 1) and
//!   `d` the designated reactant (default: the limiting one)
//! - reacted moles = `ξ·ν`; remaining = `n0 − ξ·ν` for reactants, formed = `ξ·ν` for products
//!
//! A negative remaining amount is kept as is and reported through
//! [`ExtentWarning::DesignatedNotLimiting`]; only `displayed_final_moles()` clamps it.
//!
//! ## Amount basis
//! Requests carry [`AmountBasis`] values that are resolved to moles once, in
//! [`ExtentRequest::resolve`]. Mass basis needs a molar mass, otherwise the request fails
//! with `MissingMolarMass`. Molar masses are optional for mole-basis requests; masses in the
//! result are `None` where they are unknown.
//!
//! ## Yield
//! Actual product moles are defined equal to the theoretical ones, so the reported
//! yield is always 100 %. A measured product amount would be the input needed for
//! anything else.
use super::compound_library::CompoundLibrary;
use super::errors::{StoichError, StoichResult};
use super::reaction::Reaction;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// amount of a reactant as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AmountBasis {
    /// mol
    Moles(f64),
    /// g
    Mass(f64),
}

impl AmountBasis {
    /// converts to moles; mass basis requires a molar mass (g/mol)
    pub fn to_moles(&self, name: &str, molar_mass: Option<f64>) -> StoichResult<f64> {
        match *self {
            AmountBasis::Moles(n) => Ok(n),
            AmountBasis::Mass(m) => {
                let molar_mass =
                    molar_mass.ok_or_else(|| StoichError::MissingMolarMass(name.to_string()))?;
                if !(molar_mass.is_finite() && molar_mass > 0.0) {
                    return Err(StoichError::InvalidInput(format!(
                        "molar mass of {} must be positive, got {}",
                        name, molar_mass
                    )));
                }
                Ok(m / molar_mass)
            }
        }
    }
}

/// reactant with its amount already resolved to moles
#[derive(Debug, Clone, PartialEq)]
pub struct ReactantInput {
    pub name: String,
    pub coefficient: f64,
    pub initial_moles: f64,
    pub molar_mass: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub coefficient: f64,
    pub molar_mass: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactantFeed {
    pub name: String,
    pub coefficient: f64,
    pub amount: AmountBasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub name: String,
    pub coefficient: f64,
}

/// immutable snapshot of everything one "Calculate" needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtentRequest {
    pub reactants: Vec<ReactantFeed>,
    pub products: Vec<ProductSpec>,
    /// fraction in (0, 1]; `None` means complete conversion
    pub conversion_fraction: Option<f64>,
    /// index into `reactants`; `None` means the limiting reactant
    pub designated_reactant: Option<usize>,
}

impl ExtentRequest {
    /// request for a (balanced or hand-written) reaction with one amount per reactant
    pub fn from_reaction(reaction: &Reaction, amounts: Vec<AmountBasis>) -> StoichResult<Self> {
        if amounts.len() != reaction.reactants.len() {
            return Err(StoichError::InvalidInput(format!(
                "{} amounts given for {} reactants",
                amounts.len(),
                reaction.reactants.len()
            )));
        }
        let reactants = reaction
            .reactants
            .iter()
            .zip(amounts)
            .map(|(species, amount)| ReactantFeed {
                name: species.name.clone(),
                coefficient: species.coefficient as f64,
                amount,
            })
            .collect();
        let products = reaction
            .products
            .iter()
            .map(|species| ProductSpec {
                name: species.name.clone(),
                coefficient: species.coefficient as f64,
            })
            .collect();
        Ok(Self {
            reactants,
            products,
            conversion_fraction: None,
            designated_reactant: None,
        })
    }

    pub fn with_conversion(mut self, conversion_fraction: f64) -> Self {
        self.conversion_fraction = Some(conversion_fraction);
        self
    }

    pub fn with_designated_reactant(mut self, index: usize) -> Self {
        self.designated_reactant = Some(index);
        self
    }

    /// resolves names against the library and every amount to moles
    pub fn resolve(
        &self,
        library: &CompoundLibrary,
    ) -> StoichResult<(Vec<ReactantInput>, Vec<ProductInput>)> {
        let mut reactants = Vec::with_capacity(self.reactants.len());
        for feed in &self.reactants {
            let molar_mass = library.molar_mass_of(&feed.name);
            let initial_moles = feed.amount.to_moles(&feed.name, molar_mass)?;
            reactants.push(ReactantInput {
                name: feed.name.clone(),
                coefficient: feed.coefficient,
                initial_moles,
                molar_mass,
            });
        }
        let products = self
            .products
            .iter()
            .map(|spec| ProductInput {
                name: spec.name.clone(),
                coefficient: spec.coefficient,
                molar_mass: library.molar_mass_of(&spec.name),
            })
            .collect();
        Ok((reactants, products))
    }

    pub fn compute(&self, library: &CompoundLibrary) -> StoichResult<ExtentResult> {
        let (reactants, products) = self.resolve(library)?;
        compute_extent(
            &reactants,
            &products,
            self.conversion_fraction,
            self.designated_reactant,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Reactant,
    Product,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesResult {
    pub name: String,
    pub role: Role,
    pub coefficient: f64,
    pub initial_moles: f64,
    /// consumed (reactants) or formed (products), mol
    pub reacted_moles: f64,
    /// remaining reactant or formed product, mol; negative if over-consumed
    pub final_moles: f64,
    pub molar_mass: Option<f64>,
    pub reacted_mass: Option<f64>,
    pub final_mass: Option<f64>,
    /// in the outlet stream
    pub mole_fraction: f64,
    /// in the outlet stream, `None` unless every molar mass is known
    pub mass_fraction: Option<f64>,
}

impl SpeciesResult {
    pub fn displayed_final_moles(&self) -> f64 {
        self.final_moles.max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcessReactant {
    pub name: String,
    pub remaining_moles: f64,
    /// (fed − required for complete reaction of the limiting reactant) / required × 100
    pub percent_excess: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductYield {
    pub name: String,
    pub theoretical_moles: f64,
    pub actual_moles: f64,
    pub percent_yield: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExtentWarning {
    /// the reactant would be consumed beyond its initial amount
    DesignatedNotLimiting { reactant: String, deficit_moles: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtentResult {
    pub limiting_reactant: String,
    pub limiting_index: usize,
    pub designated_reactant: String,
    pub conversion_fraction: f64,
    /// mol
    pub extent: f64,
    /// extent at complete consumption of the limiting reactant, mol
    pub max_extent: f64,
    /// of the limiting reactant
    pub percent_conversion: f64,
    /// reactants first, then products, in input order
    pub species: Vec<SpeciesResult>,
    pub excess: Vec<ExcessReactant>,
    pub yields: Vec<ProductYield>,
    pub warnings: Vec<ExtentWarning>,
}

impl ExtentResult {
    pub fn species(&self, name: &str) -> Option<&SpeciesResult> {
        self.species.iter().find(|s| s.name == name)
    }
}

fn check_positive(what: &str, name: &str, value: f64) -> StoichResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StoichError::InvalidInput(format!(
            "{} of {} must be positive, got {}",
            what, name, value
        )))
    }
}

/// computes the extent of reaction and everything derived from it
pub fn compute_extent(
    reactants: &[ReactantInput],
    products: &[ProductInput],
    conversion_fraction: Option<f64>,
    designated_reactant: Option<usize>,
) -> StoichResult<ExtentResult> {
    for r in reactants {
        check_positive("coefficient", &r.name, r.coefficient)?;
        if !(r.initial_moles.is_finite() && r.initial_moles >= 0.0) {
            return Err(StoichError::InvalidInput(format!(
                "initial amount of {} must be non-negative, got {}",
                r.name, r.initial_moles
            )));
        }
    }
    for p in products {
        check_positive("coefficient", &p.name, p.coefficient)?;
    }
    let conversion = conversion_fraction.unwrap_or(1.0);
    if !(conversion.is_finite() && conversion > 0.0 && conversion <= 1.0) {
        return Err(StoichError::InvalidInput(format!(
            "conversion fraction must be in (0, 1], got {}",
            conversion
        )));
    }

    // limiting reactant: smallest n0/ν among supplied reactants, first one on ties
    let mut limiting: Option<(usize, f64)> = None;
    for (i, r) in reactants.iter().enumerate() {
        if r.initial_moles <= 0.0 {
            continue;
        }
        let ratio = r.initial_moles / r.coefficient;
        match limiting {
            Some((_, best)) if best <= ratio => {}
            _ => limiting = Some((i, ratio)),
        }
    }
    let (limiting_index, max_extent) = limiting.ok_or(StoichError::NoReactantSupplied)?;

    let designated_index = designated_reactant.unwrap_or(limiting_index);
    let designated = reactants.get(designated_index).ok_or_else(|| {
        StoichError::InvalidInput(format!(
            "designated reactant index {} out of range ({} reactants)",
            designated_index,
            reactants.len()
        ))
    })?;
    check_positive("initial amount", &designated.name, designated.initial_moles)?;
    let extent = conversion * designated.initial_moles / designated.coefficient;
    info!(
        "limiting reactant {}, designated {}, extent {} mol (max {} mol)",
        reactants[limiting_index].name, designated.name, extent, max_extent
    );

    let mut warnings = Vec::new();
    let mut species = Vec::with_capacity(reactants.len() + products.len());
    for r in reactants {
        let reacted = extent * r.coefficient;
        let mut remaining = r.initial_moles - reacted;
        // rounding residue of a fully consumed reactant
        if remaining.abs() <= 1e-12 * r.initial_moles {
            remaining = 0.0;
        }
        if remaining < 0.0 {
            warn!(
                "{} would be consumed beyond its initial amount by {} mol",
                r.name, -remaining
            );
            warnings.push(ExtentWarning::DesignatedNotLimiting {
                reactant: r.name.clone(),
                deficit_moles: -remaining,
            });
        }
        species.push(SpeciesResult {
            name: r.name.clone(),
            role: Role::Reactant,
            coefficient: r.coefficient,
            initial_moles: r.initial_moles,
            reacted_moles: reacted,
            final_moles: remaining,
            molar_mass: r.molar_mass,
            reacted_mass: r.molar_mass.map(|m| reacted * m),
            final_mass: r.molar_mass.map(|m| remaining * m),
            mole_fraction: 0.0,
            mass_fraction: None,
        });
    }
    for p in products {
        let formed = extent * p.coefficient;
        species.push(SpeciesResult {
            name: p.name.clone(),
            role: Role::Product,
            coefficient: p.coefficient,
            initial_moles: 0.0,
            reacted_moles: formed,
            final_moles: formed,
            molar_mass: p.molar_mass,
            reacted_mass: p.molar_mass.map(|m| formed * m),
            final_mass: p.molar_mass.map(|m| formed * m),
            mole_fraction: 0.0,
            mass_fraction: None,
        });
    }
    fill_outlet_fractions(&mut species);

    let limiting_reactant = &reactants[limiting_index];
    let percent_conversion =
        extent * limiting_reactant.coefficient / limiting_reactant.initial_moles * 100.0;

    let excess = reactants
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != limiting_index)
        .map(|(i, r)| {
            let required = max_extent * r.coefficient;
            ExcessReactant {
                name: r.name.clone(),
                remaining_moles: species[i].displayed_final_moles(),
                percent_excess: (r.initial_moles - required) / required * 100.0,
            }
        })
        .collect();

    let yields = products
        .iter()
        .map(|p| {
            let theoretical = extent * p.coefficient;
            let actual = theoretical;
            ProductYield {
                name: p.name.clone(),
                theoretical_moles: theoretical,
                actual_moles: actual,
                percent_yield: actual / theoretical * 100.0,
            }
        })
        .collect();

    Ok(ExtentResult {
        limiting_reactant: limiting_reactant.name.clone(),
        limiting_index,
        designated_reactant: designated.name.clone(),
        conversion_fraction: conversion,
        extent,
        max_extent,
        percent_conversion,
        species,
        excess,
        yields,
        warnings,
    })
}

// mole and mass fractions of the outlet stream, over-consumed reactants count as zero
fn fill_outlet_fractions(species: &mut [SpeciesResult]) {
    let total_moles: f64 = species.iter().map(|s| s.displayed_final_moles()).sum();
    let masses: Option<Vec<f64>> = species
        .iter()
        .map(|s| s.molar_mass.map(|m| s.displayed_final_moles() * m))
        .collect();
    let total_mass: Option<f64> = masses.as_ref().map(|m| m.iter().sum());
    for (i, s) in species.iter_mut().enumerate() {
        s.mole_fraction = if total_moles > 0.0 {
            s.displayed_final_moles() / total_moles
        } else {
            0.0
        };
        s.mass_fraction = match (&masses, total_mass) {
            (Some(masses), Some(total)) if total > 0.0 => Some(masses[i] / total),
            _ => None,
        };
    }
}
