#[cfg(test)]
mod tests {
    use crate::Stoichiometry::compound_library::CompoundLibrary;
    use crate::Stoichiometry::errors::StoichError;
    use crate::Stoichiometry::extent::{
        AmountBasis, ExtentRequest, ExtentWarning, ProductInput, ReactantInput, Role,
        compute_extent,
    };
    use crate::Stoichiometry::reaction::Reaction;
    use approx::assert_relative_eq;

    fn reactant(name: &str, coefficient: f64, initial_moles: f64) -> ReactantInput {
        ReactantInput {
            name: name.to_string(),
            coefficient,
            initial_moles,
            molar_mass: None,
        }
    }

    fn product(name: &str, coefficient: f64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            coefficient,
            molar_mass: None,
        }
    }

    fn water_synthesis(h2: f64, o2: f64) -> ExtentRequest {
        let r = Reaction::from_equation("H2 + O2 -> H2O")
            .unwrap()
            .balanced()
            .unwrap();
        ExtentRequest::from_reaction(&r, vec![AmountBasis::Moles(h2), AmountBasis::Moles(o2)])
            .unwrap()
    }

    #[test]
    fn test_single_reactant_full_conversion() {
        let result =
            compute_extent(&[reactant("A", 1.0, 2.0)], &[product("B", 1.0)], None, None).unwrap();
        assert_eq!(result.limiting_reactant, "A");
        assert_relative_eq!(result.extent, 2.0);
        assert_relative_eq!(result.max_extent, 2.0);
        assert_relative_eq!(result.percent_conversion, 100.0);
        let a = result.species("A").unwrap();
        assert_eq!(a.role, Role::Reactant);
        assert_relative_eq!(a.final_moles, 0.0);
        let b = result.species("B").unwrap();
        assert_eq!(b.role, Role::Product);
        assert_relative_eq!(b.final_moles, 2.0);
        assert!(result.warnings.is_empty());
        assert!(result.excess.is_empty());
    }

    #[test]
    fn test_partial_conversion() {
        let result = compute_extent(
            &[reactant("A", 1.0, 2.0)],
            &[product("B", 1.0)],
            Some(0.5),
            None,
        )
        .unwrap();
        assert_relative_eq!(result.extent, 1.0);
        assert_relative_eq!(result.percent_conversion, 50.0);
        assert_relative_eq!(result.species("A").unwrap().final_moles, 1.0);
        assert_relative_eq!(result.species("A").unwrap().reacted_moles, 1.0);
        assert_relative_eq!(result.species("B").unwrap().final_moles, 1.0);
        // both species are in the outlet in equal amounts
        assert_relative_eq!(result.species("A").unwrap().mole_fraction, 0.5);
    }

    #[test]
    fn test_limiting_reactant_has_smallest_ratio() {
        let lib = CompoundLibrary::builtin();
        let result = water_synthesis(4.0, 1.0).compute(&lib).unwrap();
        assert_eq!(result.limiting_reactant, "O2");
        assert_eq!(result.limiting_index, 1);
        assert_relative_eq!(result.extent, 1.0);
        for s in result.species.iter().filter(|s| s.role == Role::Reactant) {
            assert!(result.max_extent <= s.initial_moles / s.coefficient);
        }
        assert_relative_eq!(result.species("H2").unwrap().final_moles, 2.0);
        assert_relative_eq!(result.species("H2O").unwrap().final_moles, 2.0);
    }

    #[test]
    fn test_limiting_ratio_is_minimal_for_generated_amounts() {
        let lib = CompoundLibrary::builtin();
        let reactions = [
            "H2 + O2 -> H2O",
            "N2 + H2 -> NH3",
            "C3H8 + O2 -> CO2 + H2O",
            "KMnO4 + HCl -> KCl + MnCl2 + H2O + Cl2",
        ];
        let mut seed: u64 = 42;
        for equation in reactions {
            let reaction = Reaction::from_equation(equation)
                .unwrap()
                .balanced()
                .unwrap();
            for _ in 0..25 {
                let amounts: Vec<AmountBasis> = reaction
                    .reactants
                    .iter()
                    .map(|_| {
                        seed = seed
                            .wrapping_mul(6364136223846793005)
                            .wrapping_add(1442695040888963407);
                        AmountBasis::Moles(0.01 + ((seed >> 33) % 100_000) as f64 / 100.0)
                    })
                    .collect();
                let result = ExtentRequest::from_reaction(&reaction, amounts)
                    .unwrap()
                    .compute(&lib)
                    .unwrap();
                let reactants: Vec<_> = result
                    .species
                    .iter()
                    .filter(|s| s.role == Role::Reactant)
                    .collect();
                let limiting = reactants[result.limiting_index];
                let limiting_ratio = limiting.initial_moles / limiting.coefficient;
                assert_relative_eq!(result.max_extent, limiting_ratio);
                for s in &reactants {
                    assert!(limiting_ratio <= s.initial_moles / s.coefficient, "{}", equation);
                    assert!(s.final_moles >= -1e-9, "{}: {}", equation, s.name);
                }
                assert!(result.warnings.is_empty(), "{}", equation);
            }
        }
    }

    #[test]
    fn test_tie_picks_first_reactant() {
        let result = compute_extent(
            &[reactant("A", 1.0, 2.0), reactant("B", 2.0, 4.0)],
            &[product("C", 1.0)],
            None,
            None,
        )
        .unwrap();
        assert_eq!(result.limiting_index, 0);
        assert_eq!(result.limiting_reactant, "A");
    }

    #[test]
    fn test_zero_amount_reactant_is_not_limiting() {
        let result = compute_extent(
            &[reactant("A", 1.0, 0.0), reactant("B", 1.0, 3.0)],
            &[product("C", 1.0)],
            None,
            None,
        )
        .unwrap();
        assert_eq!(result.limiting_reactant, "B");
        // A is consumed beyond what was fed
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_fully_consumed_reactant_has_no_rounding_deficit() {
        // 0.23 - 3 * (0.23 / 3) is slightly negative in f64
        let result = compute_extent(
            &[reactant("A", 3.0, 0.23), reactant("B", 1.0, 5.0)],
            &[product("C", 1.0)],
            None,
            None,
        )
        .unwrap();
        assert_eq!(result.limiting_reactant, "A");
        assert_eq!(result.species("A").unwrap().final_moles, 0.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_no_reactant_supplied() {
        let result = compute_extent(
            &[reactant("A", 1.0, 0.0), reactant("B", 1.0, 0.0)],
            &[product("C", 1.0)],
            None,
            None,
        );
        assert!(matches!(result, Err(StoichError::NoReactantSupplied)));
    }

    #[test]
    fn test_mass_basis() {
        let lib = CompoundLibrary::builtin();
        let r = Reaction::from_equation("CH4 + O2 -> CO2 + H2O")
            .unwrap()
            .balanced()
            .unwrap();
        let request =
            ExtentRequest::from_reaction(&r, vec![AmountBasis::Mass(16.04), AmountBasis::Mass(64.0)])
                .unwrap();
        let result = request.compute(&lib).unwrap();
        assert_relative_eq!(result.extent, 1.0, epsilon = 1e-12);
        let co2 = result.species("CO2").unwrap();
        assert_relative_eq!(co2.final_moles, 1.0, epsilon = 1e-12);
        assert_relative_eq!(co2.final_mass.unwrap(), 44.01, epsilon = 1e-9);
        let water = result.species("H2O").unwrap();
        assert_relative_eq!(water.final_mass.unwrap(), 2.0 * 18.015, epsilon = 1e-9);
    }

    #[test]
    fn test_mass_basis_without_molar_mass() {
        let lib = CompoundLibrary::builtin();
        let r = Reaction::from_equation("Xe + F2 -> XeF4")
            .unwrap()
            .balanced()
            .unwrap();
        let request =
            ExtentRequest::from_reaction(&r, vec![AmountBasis::Mass(10.0), AmountBasis::Moles(1.0)])
                .unwrap();
        assert!(matches!(
            request.compute(&lib),
            Err(StoichError::MissingMolarMass(name)) if name == "Xe"
        ));
        // mole basis works without any molar mass, masses are simply unknown
        let request =
            ExtentRequest::from_reaction(&r, vec![AmountBasis::Moles(1.0), AmountBasis::Moles(1.0)])
                .unwrap();
        let result = request.compute(&lib).unwrap();
        assert_eq!(result.limiting_reactant, "F2");
        assert!(result.species("XeF4").unwrap().final_mass.is_none());
        assert!(result.species("XeF4").unwrap().mass_fraction.is_none());
    }

    #[test]
    fn test_designated_reactant_not_limiting() {
        let lib = CompoundLibrary::builtin();
        let result = water_synthesis(4.0, 1.0)
            .with_designated_reactant(0)
            .compute(&lib)
            .unwrap();
        assert_eq!(result.designated_reactant, "H2");
        assert_eq!(result.limiting_reactant, "O2");
        assert_relative_eq!(result.extent, 2.0);
        let o2 = result.species("O2").unwrap();
        assert_relative_eq!(o2.final_moles, -1.0);
        assert_relative_eq!(o2.displayed_final_moles(), 0.0);
        assert_eq!(
            result.warnings,
            vec![ExtentWarning::DesignatedNotLimiting {
                reactant: "O2".to_string(),
                deficit_moles: 1.0
            }]
        );
    }

    #[test]
    fn test_excess_and_outlet_composition() {
        let lib = CompoundLibrary::builtin();
        let result = water_synthesis(5.0, 1.0).compute(&lib).unwrap();
        assert_eq!(result.excess.len(), 1);
        let h2 = &result.excess[0];
        assert_eq!(h2.name, "H2");
        assert_relative_eq!(h2.remaining_moles, 3.0);
        assert_relative_eq!(h2.percent_excess, 150.0);

        assert_relative_eq!(result.species("H2").unwrap().mole_fraction, 0.6);
        assert_relative_eq!(result.species("O2").unwrap().mole_fraction, 0.0);
        assert_relative_eq!(result.species("H2O").unwrap().mole_fraction, 0.4);
        let total_mass = 3.0 * 2.016 + 2.0 * 18.015;
        assert_relative_eq!(
            result.species("H2O").unwrap().mass_fraction.unwrap(),
            2.0 * 18.015 / total_mass,
            epsilon = 1e-12
        );
        let sum: f64 = result
            .species
            .iter()
            .map(|s| s.mass_fraction.unwrap())
            .sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_yield_is_complete() {
        let lib = CompoundLibrary::builtin();
        let result = water_synthesis(2.0, 2.0)
            .with_conversion(0.25)
            .compute(&lib)
            .unwrap();
        assert_eq!(result.yields.len(), 1);
        assert_relative_eq!(result.yields[0].theoretical_moles, 0.5);
        assert_relative_eq!(result.yields[0].percent_yield, 100.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let products = [product("B", 1.0)];
        let bad = |r: Vec<ReactantInput>, x: Option<f64>, d: Option<usize>| {
            matches!(
                compute_extent(&r, &products, x, d),
                Err(StoichError::InvalidInput(_))
            )
        };
        assert!(bad(vec![reactant("A", 1.0, 1.0)], Some(0.0), None));
        assert!(bad(vec![reactant("A", 1.0, 1.0)], Some(1.5), None));
        assert!(bad(vec![reactant("A", 1.0, 1.0)], Some(f64::NAN), None));
        assert!(bad(vec![reactant("A", 0.0, 1.0)], None, None));
        assert!(bad(vec![reactant("A", 1.0, -1.0)], None, None));
        assert!(bad(vec![reactant("A", 1.0, 1.0)], None, Some(3)));
        assert!(bad(
            vec![reactant("A", 1.0, 1.0), reactant("C", 1.0, 0.0)],
            None,
            Some(1)
        ));
        assert!(matches!(
            compute_extent(&[reactant("A", 1.0, 1.0)], &[product("B", -1.0)], None, None),
            Err(StoichError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_amount_count_must_match_reactants() {
        let r = Reaction::from_equation("H2 + O2 -> H2O").unwrap();
        assert!(matches!(
            ExtentRequest::from_reaction(&r, vec![AmountBasis::Moles(1.0)]),
            Err(StoichError::InvalidInput(_))
        ));
    }
}
