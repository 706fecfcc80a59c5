use crate::Stoichiometry::compound_library::CompoundLibrary;
use crate::Stoichiometry::extent::{AmountBasis, ExtentRequest};
use crate::Stoichiometry::output::{matrix_table, print_extent, print_reaction};
use crate::Stoichiometry::reaction::Reaction;

pub fn stoich_examples(task: usize) {
    let library = CompoundLibrary::builtin();
    match task {
        0 => {
            // BALANCING
            for equation in [
                "H2 + O2 -> H2O",
                "C8H18 + O2 -> CO2 + H2O",
                "KMnO4 + HCl -> KCl + MnCl2 + H2O + Cl2",
                "K4[Fe(CN)6] + H2SO4 + H2O -> K2SO4 + FeSO4 + (NH4)2SO4 + CO",
            ] {
                match Reaction::from_equation(equation).and_then(|r| r.balanced()) {
                    Ok(r) => print_reaction(&r),
                    Err(e) => println!("{}: {}", equation, e),
                }
            }
            // no unique answer: two independent reactions are mixed together
            match Reaction::from_equation("H2 + O2 + N2 -> H2O + NH3").and_then(|r| r.balanced()) {
                Ok(r) => println!("unexpected: {}", r),
                Err(e) => println!("as expected: {}", e),
            }
        }
        1 => {
            // matrix and reduced row echelon form
            use crate::Stoichiometry::null_space::solve;
            let reaction = match Reaction::from_equation("CH4 + O2 -> CO2 + H2O") {
                Ok(r) => r,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            match reaction.matrix() {
                Ok(matrix) => {
                    matrix_table(&matrix).printstd();
                    println!("{}", matrix.to_dmatrix());
                    match solve(&matrix) {
                        Ok(solution) => {
                            for row in &solution.rref {
                                let row: Vec<String> = row.iter().map(|f| f.to_string()).collect();
                                println!("[{}]", row.join(", "));
                            }
                            println!(
                                "pivot columns {:?}, free columns {:?}",
                                solution.pivot_columns, solution.free_columns
                            );
                        }
                        Err(e) => println!("{}", e),
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        2 => {
            // ammonia synthesis, 3 mol N2 and 6 mol H2: hydrogen is limiting
            let result = Reaction::from_equation("N2 + H2 -> NH3")
                .and_then(|r| r.balanced())
                .and_then(|r| {
                    ExtentRequest::from_reaction(
                        &r,
                        vec![AmountBasis::Moles(3.0), AmountBasis::Moles(6.0)],
                    )
                })
                .and_then(|request| request.compute(&library));
            match result {
                Ok(result) => print_extent(&result, 3),
                Err(e) => println!("{}", e),
            }
        }
        3 => {
            // methane combustion with 100 g CH4 and 500 g O2: oxygen in excess
            let result = Reaction::from_equation("CH4 + O2 -> CO2 + H2O")
                .and_then(|r| r.balanced())
                .and_then(|r| {
                    ExtentRequest::from_reaction(
                        &r,
                        vec![AmountBasis::Mass(100.0), AmountBasis::Mass(500.0)],
                    )
                })
                .and_then(|request| request.compute(&library));
            match result {
                Ok(result) => {
                    print_extent(&result, 2);
                    for e in &result.excess {
                        println!("{} in excess by {:.1} %", e.name, e.percent_excess);
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        4 => {
            // 80 % conversion of the hydrogen, which is not the limiting reactant:
            // the oxygen balance goes negative and a warning is reported
            let result = Reaction::from_equation("H2 + O2 -> H2O")
                .and_then(|r| r.balanced())
                .and_then(|r| {
                    ExtentRequest::from_reaction(
                        &r,
                        vec![AmountBasis::Moles(4.0), AmountBasis::Moles(1.0)],
                    )
                })
                .map(|request| request.with_conversion(0.8).with_designated_reactant(0))
                .and_then(|request| request.compute(&library));
            match result {
                Ok(result) => print_extent(&result, 3),
                Err(e) => println!("{}", e),
            }
        }
        5 => {
            // molar masses and hydrates
            use crate::Stoichiometry::formula_parser::{parse_formula, to_formula_string};
            use crate::Stoichiometry::molmass::calculate_molar_mass_of_vector_of_subs;
            let formulas = ["H2O", "Ca(OH)2", "CuSO4·5H2O", "K4[Fe(CN)6]", "C6H12O6"];
            match calculate_molar_mass_of_vector_of_subs(&formulas) {
                Ok(masses) => {
                    for (formula, mass) in formulas.iter().zip(masses) {
                        let canonical = parse_formula(formula)
                            .map(|counts| to_formula_string(&counts))
                            .unwrap_or_default();
                        println!("{:<14} {:<14} {:>10.3} g/mol", formula, canonical, mass);
                    }
                }
                Err(e) => println!("{}", e),
            }
            let mut derived = CompoundLibrary::builtin();
            derived.set_derive_molar_mass_from_formula(true);
            println!(
                "XeF4 in the table: {:?}, derived from the formula: {:?}",
                library.molar_mass_of("XeF4"),
                derived.molar_mass_of("XeF4")
            );
        }
        _ => println!("no example with number {}", task),
    }
}
